//! Collaborators the carousel depends on: the data adapter and the host
//! surface that actually draws slots.

use crate::pool::{Slot, SlotId};

/// Data source feeding the carousel.
pub trait Adapter {
    /// Template used to build each slot's content.
    fn layout_template(&self) -> &str;

    fn item_count(&self) -> usize;

    /// Fill the content of `slot` with item `index`.
    fn bind(&mut self, _slot: SlotId, _index: usize) {}

    fn on_click(&mut self, _slot: SlotId, _index: usize) {}

    /// Item `index` became the main slot.
    fn on_displaying(&mut self, _index: usize) {}
}

/// Platform side of the widget.
pub trait Surface {
    /// Apply bounds, paint depth and transform of one slot.
    fn place(&mut self, slot: &Slot);

    /// Whether an ancestor scroller may take over the current pointer
    /// sequence.
    fn set_parent_intercept(&mut self, allowed: bool);
}

/// Surface that draws nothing.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn place(&mut self, _slot: &Slot) {}

    fn set_parent_intercept(&mut self, _allowed: bool) {}
}
