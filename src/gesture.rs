//! Pointer events and per-sequence drag classification.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32, time_ms: u64) -> Self {
        Self { kind, x, y, time_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Horizontal,
    Vertical,
}

/// What the layout did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not consumed; ancestors may act on it.
    Pass,
    /// The carousel owns the rest of this pointer sequence.
    Claim,
}

/// State of a single pointer sequence. Reset on every down.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub mode: Mode,
    pub down_x: i32,
    pub down_y: i32,
    pub last_x: i32,
    /// Sum of every applied horizontal sample.
    pub total_dx: i32,
    /// Hidden slot has been pulled in from the left mid-drag.
    pub revealing_right: bool,
    /// Release must commit rightward regardless of the edge test.
    pub force_right: bool,
    /// Pool index under the down point, if any.
    pub pressed: Option<usize>,
}

impl GestureState {
    pub fn begin(&mut self, x: f32, y: f32, pressed: Option<usize>) {
        *self = Self {
            down_x: x as i32,
            down_y: y as i32,
            last_x: x as i32,
            pressed,
            ..Self::default()
        };
    }

    /// Decides the axis of an idle sequence. Returns the new mode once it
    /// leaves `Idle`; a tie keeps waiting.
    pub fn classify(&mut self, x: f32, y: f32) -> Option<Mode> {
        if self.mode != Mode::Idle {
            return None;
        }
        let dx = (self.down_x - x as i32).abs();
        let dy = (self.down_y - y as i32).abs();
        self.mode = if dx > dy {
            Mode::Horizontal
        } else if dy > dx {
            Mode::Vertical
        } else {
            return None;
        };
        Some(self.mode)
    }

    /// Horizontal delta since the previous sample.
    pub fn advance(&mut self, x: f32) -> i32 {
        let cur = x as i32;
        let diff = cur - self.last_x;
        self.last_x = cur;
        self.total_dx += diff;
        diff
    }

    pub fn is_tap(&self) -> bool {
        self.mode == Mode::Idle
    }
}
