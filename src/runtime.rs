//! Single-threaded event loop for a carousel. Helper threads only post
//! messages; the layout is touched on the loop thread alone.

use anyhow::Result;
use log::{error, info};
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};

use crate::adapter::{Adapter, Surface};
use crate::gesture::PointerEvent;
use crate::layout::PileLayout;

#[derive(Debug, Clone, PartialEq)]
pub enum PileEvent {
    Pointer(PointerEvent),
    Frame(u64),
    DataChanged,
    Shutdown,
}

/// Per-carousel handle for posting into its loop.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tx: Sender<PileEvent>,
    origin: Instant,
}

impl Scheduler {
    pub fn channel() -> (Self, Receiver<PileEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                tx,
                origin: Instant::now(),
            },
            rx,
        )
    }

    /// Milliseconds since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// False once the loop has gone away.
    pub fn post(&self, ev: PileEvent) -> bool {
        self.tx.send(ev).is_ok()
    }

    /// Posts a `Frame` every `period` until the loop stops listening.
    pub fn spawn_frames(&self, period: Duration) -> thread::JoinHandle<()> {
        let sched = self.clone();
        thread::spawn(move || {
            while sched.post(PileEvent::Frame(sched.now_ms())) {
                thread::sleep(period);
            }
        })
    }

    /// Posts `Shutdown` after `after`.
    pub fn spawn_deadline(&self, after: Duration) -> thread::JoinHandle<()> {
        let sched = self.clone();
        thread::spawn(move || {
            thread::sleep(after);
            sched.post(PileEvent::Shutdown);
        })
    }

    /// Posts `Shutdown` on SIGINT or SIGTERM.
    pub fn spawn_signal_watch(&self) -> Result<thread::JoinHandle<()>> {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let sched = self.clone();
        Ok(thread::spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!("signal {sig}: stopping");
                sched.post(PileEvent::Shutdown);
            }
        }))
    }
}

/// Drains events into `layout` until `Shutdown` or every sender is gone.
pub fn run<A: Adapter, S: Surface>(layout: &mut PileLayout<A, S>, rx: Receiver<PileEvent>) {
    for ev in rx {
        match ev {
            PileEvent::Pointer(p) => {
                if let Err(e) = layout.on_pointer(p) {
                    error!("pointer event failed: {e}");
                }
            }
            PileEvent::Frame(now) => layout.tick(now),
            PileEvent::DataChanged => {
                if let Err(e) = layout.notify_data_set_changed() {
                    error!("rebind failed: {e}");
                }
            }
            PileEvent::Shutdown => break,
        }
    }
}
