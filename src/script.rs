//! Plain-text pointer scripts for driving a carousel without a device.
//!
//! One step per line: `down X Y [T]`, `move X Y [T]`, `up X Y [T]`,
//! `cancel [T]` or `tick T`. Blank lines and `#` comments are skipped.
//! Without `T` a step lands 16 ms after the previous one.

use anyhow::{Result, anyhow};
use log::warn;

use crate::gesture::{PointerEvent, PointerKind};
use crate::text::{str_to_float, str_to_int};

pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Pointer(PointerEvent),
    Tick(u64),
}

impl Step {
    pub fn time_ms(&self) -> u64 {
        match self {
            Step::Pointer(ev) => ev.time_ms,
            Step::Tick(t) => *t,
        }
    }
}

pub fn parse(src: &str) -> Result<Vec<Step>> {
    let mut out = Vec::new();
    let mut clock = 0u64;
    let mut last = (0.0f32, 0.0f32);

    for (n, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        let time_at = |i: usize, clock: u64| -> u64 {
            match args.get(i) {
                Some(t) => str_to_int(Some(t)).max(0) as u64,
                None => clock + FRAME_MS,
            }
        };

        let step = match verb.to_ascii_lowercase().as_str() {
            "down" | "move" | "up" => {
                if args.len() < 2 {
                    return Err(anyhow!("line {}: '{verb}' needs X and Y", n + 1));
                }
                let kind = match verb {
                    v if v.eq_ignore_ascii_case("down") => PointerKind::Down,
                    v if v.eq_ignore_ascii_case("move") => PointerKind::Move,
                    _ => PointerKind::Up,
                };
                let x = str_to_float(args.first().copied());
                let y = str_to_float(args.get(1).copied());
                last = (x, y);
                Step::Pointer(PointerEvent::new(kind, x, y, time_at(2, clock)))
            }
            "cancel" => Step::Pointer(PointerEvent::new(
                PointerKind::Cancel,
                last.0,
                last.1,
                time_at(0, clock),
            )),
            "tick" => Step::Tick(time_at(0, clock)),
            other => return Err(anyhow!("line {}: unknown step '{other}'", n + 1)),
        };

        if step.time_ms() < clock {
            warn!("line {}: time runs backwards ({} < {clock})", n + 1, step.time_ms());
        }
        clock = step.time_ms().max(clock);
        out.push(step);
    }
    Ok(out)
}
