//! Fixed pool of slots standing in for an endless, cyclic item sequence.

use log::debug;
use serde::Serialize;

use crate::transform::Transform;

/// Number of slots shown at rest.
pub const FOCUS_DISPLAY_COUNT: usize = 3;
/// Pool position 0 is parked off-screen; the first visible slot is 1.
pub const FIRST_FRAME_SHOW_INDEX: usize = 1;
/// Visible slots plus the hidden one.
pub const SLOT_COUNT: usize = FOCUS_DISPLAY_COUNT + 1;

/// Stable handle of a slot's visual container.
pub type SlotId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub id: SlotId,
    /// Logical position in the cyclic sequence.
    pub position: i64,
    pub bounds: Bounds,
    /// Paint order; higher draws on top.
    pub depth: usize,
    pub transform: Transform,
}

impl Slot {
    pub fn left(&self) -> i32 {
        self.bounds.left
    }

    pub fn right(&self) -> i32 {
        self.bounds.right
    }

    pub fn move_to(&mut self, left: i32) {
        let w = self.bounds.width();
        self.bounds.left = left;
        self.bounds.right = left + w;
    }

    pub fn offset(&mut self, dx: i32) {
        self.bounds.left += dx;
        self.bounds.right += dx;
    }

    /// Point test against the bounds scaled about their centre.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let cx = (self.bounds.left + self.bounds.right) as f32 / 2.0;
        let cy = (self.bounds.top + self.bounds.bottom) as f32 / 2.0;
        let hw = self.bounds.width() as f32 * self.transform.scale_x / 2.0;
        let hh = self.bounds.height() as f32 * self.transform.scale_y / 2.0;
        x >= cx - hw && x < cx + hw && y >= cy - hh && y < cy + hh
    }
}

/// Pool order doubles as painter's order: index 0 is the hidden slot on the
/// left, index 1 the main slot, the rest recede behind it.
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<Slot>,
}

impl SlotPool {
    /// Creates `count` slots labelled `-FIRST_FRAME_SHOW_INDEX ..` so that
    /// the main slot starts at position 0.
    pub fn new(count: usize) -> Self {
        let slots = (0..count)
            .map(|i| Slot {
                id: i,
                position: i as i64 - FIRST_FRAME_SHOW_INDEX as i64,
                bounds: Bounds::default(),
                depth: 0,
                transform: Transform::IDENTITY,
            })
            .collect();
        let mut pool = Self { slots };
        pool.restack();
        pool
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    /// Logical positions in pool order.
    pub fn positions(&self) -> Vec<i64> {
        self.slots.iter().map(|s| s.position).collect()
    }

    /// Moves the slot at `from` to the front, labelled one before the
    /// current front.
    pub fn rotate_to_front(&mut self, from: usize) {
        let (Some(front), true) = (self.slots.first(), from < self.slots.len()) else {
            return;
        };
        let label = front.position - 1;
        let mut slot = self.slots.remove(from);
        debug!("slot {} -> front as position {label}", slot.id);
        slot.position = label;
        self.slots.insert(0, slot);
        self.restack();
    }

    /// Moves the slot at `from` to the back, labelled one after the
    /// current back.
    pub fn rotate_to_back(&mut self, from: usize) {
        let (Some(back), true) = (self.slots.last(), from < self.slots.len()) else {
            return;
        };
        let label = back.position + 1;
        let mut slot = self.slots.remove(from);
        debug!("slot {} -> back as position {label}", slot.id);
        slot.position = label;
        self.slots.push(slot);
        self.restack();
    }

    /// Front two share the top depth, the rest step down one by one.
    pub fn restack(&mut self) {
        let n = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.depth = stack_depth(i, n);
        }
    }

    /// Slot under a point, topmost first.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(x, y))
            .max_by_key(|(i, s)| (s.depth, *i))
            .map(|(i, _)| i)
    }
}

pub fn stack_depth(index: usize, count: usize) -> usize {
    if index < 2 {
        count.saturating_sub(1)
    } else {
        count - index
    }
}
