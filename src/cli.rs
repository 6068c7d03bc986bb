use anyhow::{Result, anyhow};
use log::{debug, info};
use pico_args::Arguments;
use std::{env, fs, path::PathBuf, time::Duration};

use crate::config::PileConfig;
use crate::demo::{DemoAdapter, RecordingSurface};
use crate::index::data_index;
use crate::layout::PileLayout;
use crate::runtime::{self, Scheduler};
use crate::script::{self, Step};
use crate::text::str_to_int;

const DEFAULT_WIDTH: i32 = 1080;

const BUILTIN_SCRIPT: &str = r#"
# swipe left: next item
down 800 100 1000
move 700 100
move 200 100
up 200 100
tick 1500
# swipe right: back again
down 200 100 2000
move 300 100
move 800 100
up 800 100
tick 2500
# tap the main slot
down 400 150 3000
up 400 150 3080
# vertical drag belongs to the parent
down 400 100 4000
move 405 300
up 405 300
# hands off: auto-advance
tick 9500
tick 15000
"#;

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    // Flags-based help (-h/--help)
    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    // First free arg is the subcommand
    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            match topic {
                Some(t) => print_subcmd_help(&t),
                None => print_help(),
            }
            Ok(())
        }

        Some("demo") => {
            // usage:
            //   pile demo
            //   pile demo --script swipes.txt --items 3
            let cfg = load_config(&mut pargs)?;
            let width = width_arg(&mut pargs)?;
            let items: usize = pargs.opt_value_from_str("--items")?.unwrap_or(5);
            let script_path: Option<PathBuf> = pargs.opt_value_from_str("--script")?;
            let src = match &script_path {
                Some(p) => fs::read_to_string(p)
                    .map_err(|e| anyhow!("failed to read {}: {e}", p.display()))?,
                None => BUILTIN_SCRIPT.to_string(),
            };
            let report = run_demo(cfg, width, items, &src)?;
            print_response(&report);
            Ok(())
        }

        Some("play") => {
            // Runs until --seconds elapses or a signal arrives
            let cfg = load_config(&mut pargs)?;
            let width = width_arg(&mut pargs)?;
            let items: usize = pargs.opt_value_from_str("--items")?.unwrap_or(5);
            let seconds: Option<u64> = pargs.opt_value_from_str("--seconds")?;
            let report = run_play(cfg, width, items, seconds)?;
            print_response(&report);
            Ok(())
        }

        Some("index") => {
            // usage: pile index -4 3
            let usage = || anyhow!("usage: pile index <position> <count>");
            let position: String = pargs.free_from_str().map_err(|_| usage())?;
            let count: String = pargs.free_from_str().map_err(|_| usage())?;
            let count = str_to_int(Some(&count)).max(0) as usize;
            let index = data_index(str_to_int(Some(&position)), count)?;
            println!("{index}");
            Ok(())
        }

        Some("init-config") => {
            let path = PileConfig::install_default()?;
            println!("pile: config at {}", path.display());
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn load_config(pargs: &mut Arguments) -> Result<PileConfig> {
    let path: Option<PathBuf> = pargs.opt_value_from_str("--config")?;
    PileConfig::resolve(path.as_deref())
}

fn width_arg(pargs: &mut Arguments) -> Result<i32> {
    Ok(pargs.opt_value_from_str("--width")?.unwrap_or(DEFAULT_WIDTH))
}

fn new_layout(
    cfg: PileConfig,
    width: i32,
    items: usize,
) -> Result<PileLayout<DemoAdapter, RecordingSurface>> {
    let mut layout = PileLayout::new(cfg, RecordingSurface::default());
    layout.set_adapter(DemoAdapter::with_items(items))?;
    let (w, h) = layout.measure(width, 0, 0)?;
    info!("carousel {w}x{h} with {items} items");
    Ok(layout)
}

pub fn run_demo(cfg: PileConfig, width: i32, items: usize, src: &str) -> Result<serde_json::Value> {
    let steps = script::parse(src)?;
    let mut layout = new_layout(cfg, width, items)?;

    for step in steps {
        match step {
            Step::Pointer(ev) => {
                let dispatch = layout.on_pointer(ev)?;
                debug!("{:?} at ({}, {}) -> {dispatch:?}", ev.kind, ev.x, ev.y);
            }
            Step::Tick(now) => layout.tick(now),
        }
    }
    Ok(report(&layout))
}

pub fn run_play(
    cfg: PileConfig,
    width: i32,
    items: usize,
    seconds: Option<u64>,
) -> Result<serde_json::Value> {
    let mut layout = new_layout(cfg, width, items)?;
    let (sched, rx) = Scheduler::channel();

    sched.spawn_frames(Duration::from_millis(script::FRAME_MS));
    if let Some(s) = seconds {
        sched.spawn_deadline(Duration::from_secs(s));
    }
    sched.spawn_signal_watch()?;

    info!("playing; Ctrl-C to stop");
    runtime::run(&mut layout, rx);
    Ok(report(&layout))
}

fn report(layout: &PileLayout<DemoAdapter, RecordingSurface>) -> serde_json::Value {
    let (displayed, clicks) = layout
        .adapter()
        .map(|a| (a.displayed.clone(), a.clicks.clone()))
        .unwrap_or_default();
    serde_json::json!({
        "ok": true,
        "data": {
            "main_index": layout.main_index().ok().flatten(),
            "positions": layout.pool().positions(),
            "displayed": displayed,
            "clicks": clicks,
            "slots": layout.pool().iter().collect::<Vec<_>>(),
        }
    })
}

fn print_help() {
    println!(
        r#"pile — cyclic pile carousel

USAGE:
  pile help [command]                     Show general or command-specific help
  pile demo [--script FILE]               Replay a pointer script and print a report
  pile play [--seconds N]                 Run the live loop with auto-advance
  pile index <position> <count>           Map a logical position to an item index
  pile init-config                        Install the default config

COMMON OPTIONS:
  --config FILE   config file (default ~/.config/pile/pile.toml)
  --width PX      widget width (default 1080)
  --items N       number of demo items (default 5)
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "demo" => println!(
            "usage: pile demo [--config FILE] [--width PX] [--items N] [--script FILE]\n\
             Script lines: down X Y [T] | move X Y [T] | up X Y [T] | cancel [T] | tick T"
        ),
        "play" => println!(
            "usage: pile play [--config FILE] [--width PX] [--items N] [--seconds N]\n\
             Runs until the deadline or SIGINT/SIGTERM."
        ),
        "index" => println!("usage: pile index <position> <count>"),
        "init-config" => println!(
            "usage: pile init-config\nWrites ~/.config/pile/pile.toml if it does not exist."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}

fn print_response(v: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_default());
}
