//! Demo collaborators: an image-URL adapter and a surface that remembers
//! where each slot was last placed.

use log::{info, trace};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::adapter::{Adapter, Surface};
use crate::pool::{Slot, SlotId};

pub const DEMO_TEMPLATE: &str = "focus_item";

pub const DEMO_IMAGES: [&str; 3] = [
    "https://s2.chunboimg.com/group1/M01/37/98/Cv4JrmT4kTCAR02NAAIwulbN2tw378_640_390.jpg",
    "https://s2.chunboimg.com/group1/M01/37/86/Cv4JrWT1-U2AebXVAAHc2T_CgQI810_640_390.jpg",
    "https://s2.chunboimg.com/group1/M01/36/78/Cv4JrmTbMXeAEeasAAIYqz4koKI917_640_390.jpg",
];

#[derive(Debug, Default, Serialize)]
pub struct DemoAdapter {
    pub urls: Vec<String>,
    /// Item currently bound to each slot.
    pub bound: BTreeMap<SlotId, usize>,
    pub clicks: Vec<usize>,
    pub displayed: Vec<usize>,
}

impl DemoAdapter {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Self::default()
        }
    }

    /// The bundled images, repeated up to `count` items.
    pub fn with_items(count: usize) -> Self {
        let urls = (0..count)
            .map(|i| DEMO_IMAGES[i % DEMO_IMAGES.len()].to_string())
            .collect();
        Self::new(urls)
    }
}

impl Adapter for DemoAdapter {
    fn layout_template(&self) -> &str {
        DEMO_TEMPLATE
    }

    fn item_count(&self) -> usize {
        self.urls.len()
    }

    fn bind(&mut self, slot: SlotId, index: usize) {
        if let Some(url) = self.urls.get(index) {
            trace!("slot {slot} loads {url}");
        }
        self.bound.insert(slot, index);
    }

    fn on_click(&mut self, _slot: SlotId, index: usize) {
        info!("clicked item {index}");
        self.clicks.push(index);
    }

    fn on_displaying(&mut self, index: usize) {
        self.displayed.push(index);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: BTreeMap<SlotId, Slot>,
    pub parent_intercept: bool,
}

impl Surface for RecordingSurface {
    fn place(&mut self, slot: &Slot) {
        trace!(
            "place slot {} at {}..{} depth {} alpha {:.2}",
            slot.id, slot.bounds.left, slot.bounds.right, slot.depth, slot.transform.alpha
        );
        self.frames.insert(slot.id, slot.clone());
    }

    fn set_parent_intercept(&mut self, allowed: bool) {
        self.parent_intercept = allowed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_items_cycles_images() {
        let a = DemoAdapter::with_items(5);
        assert_eq!(a.item_count(), 5);
        assert_eq!(a.urls[3], DEMO_IMAGES[0]);
    }
}
