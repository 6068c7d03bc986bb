//! Auto-advance timer state, owned per layout and polled from `tick`.

use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct AutoAdvance {
    interval_ms: Option<u64>,
    running: bool,
    deadline: Option<u64>,
}

impl AutoAdvance {
    /// `seconds <= 0` turns the feature off for good.
    pub fn new(seconds: i32) -> Self {
        let interval_ms = (seconds > 0).then(|| seconds as u64 * 1000);
        Self {
            interval_ms,
            running: false,
            deadline: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Arms the timer. Without a timestamp the first `poll` anchors it.
    pub fn start(&mut self, now_ms: Option<u64>) {
        let Some(interval) = self.interval_ms else {
            return;
        };
        if self.running {
            return;
        }
        self.running = true;
        self.deadline = now_ms.map(|t| t + interval);
        debug!("auto-advance armed (deadline {:?})", self.deadline);
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("auto-advance disarmed");
        }
        self.running = false;
        self.deadline = None;
    }

    /// Returns true when the timer is due; re-arms it for the next period.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let (true, Some(interval)) = (self.running, self.interval_ms) else {
            return false;
        };
        match self.deadline {
            None => {
                self.deadline = Some(now_ms + interval);
                false
            }
            Some(d) if now_ms >= d => {
                self.deadline = Some(now_ms + interval);
                true
            }
            Some(_) => false,
        }
    }

    /// Shuts the feature off after a failed fire.
    pub fn disable(&mut self) {
        warn!("auto-advance disabled");
        self.interval_ms = None;
        self.running = false;
        self.deadline = None;
    }
}
