//! The carousel container: sizing, slot placement, drag handling, commits,
//! settle animation and auto-advance.

use log::{debug, error, info, warn};

use crate::adapter::{Adapter, Surface};
use crate::animation::{Decelerate, SettleAnimation};
use crate::config::{PileConfig, Variant};
use crate::error::{PileError, Result};
use crate::gesture::{Dispatch, GestureState, Mode, PointerEvent, PointerKind};
use crate::index::data_index;
use crate::pool::{
    Bounds, FIRST_FRAME_SHOW_INDEX, FOCUS_DISPLAY_COUNT, SLOT_COUNT, Slot, SlotPool,
};
use crate::timer::AutoAdvance;
use crate::transform::{Regime, Transform};

/// Extra horizontal step between stacked slots, on top of the interval.
pub const PEEK_STEP: i32 = 100;

const MAIN: usize = FIRST_FRAME_SHOW_INDEX;
const HIDDEN: usize = 0;
const LAST: usize = SLOT_COUNT - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    pub interval: i32,
    pub slot_width: i32,
    pub slot_height: i32,
    /// Rest left edge per pool position.
    pub origins: [i32; SLOT_COUNT],
}

impl Geometry {
    fn compute(config: &PileConfig, width: i32, padding_left: i32, padding_right: i32) -> Result<Self> {
        let interval = config.interval_px();
        let invalid = |slot_width| PileError::InvalidGeometry { width, slot_width };
        let slot_width = interval
            .checked_mul(FOCUS_DISPLAY_COUNT as i32)
            .and_then(|gaps| {
                width
                    .checked_sub(padding_left)?
                    .checked_sub(padding_right)?
                    .checked_sub(gaps)
            })
            .ok_or(invalid(0))?;
        if slot_width <= 0 {
            return Err(invalid(slot_width));
        }
        let slot_height = (slot_width as f32 * config.layout.size_ratio) as i32;
        let step = interval.checked_add(PEEK_STEP).ok_or(invalid(slot_width))?;
        let mut origins = [0; SLOT_COUNT];
        for (i, o) in origins.iter_mut().enumerate() {
            let origin = if i == HIDDEN {
                (-slot_width).checked_sub(interval)
            } else {
                (i as i32 - 1).checked_mul(step)
            };
            *o = origin.ok_or(invalid(slot_width))?;
        }
        // the back slot's right edge must stay representable
        origins[LAST]
            .checked_add(slot_width)
            .ok_or(invalid(slot_width))?;
        Ok(Self {
            width,
            height: slot_height,
            interval,
            slot_width,
            slot_height,
            origins,
        })
    }

    fn rest_bounds(&self, index: usize) -> Bounds {
        let left = self.origins[index.min(LAST)];
        let top = (self.height - self.slot_height) / 2;
        Bounds {
            left,
            top,
            right: left + self.slot_width,
            bottom: top + self.slot_height,
        }
    }
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Pool rotated right: the previous item became the main slot.
    Right,
    /// Pool rotated left: the next item became the main slot.
    Left,
}

pub struct PileLayout<A, S> {
    config: PileConfig,
    surface: S,
    adapter: Option<A>,
    bound: bool,
    geometry: Option<Geometry>,
    pool: SlotPool,
    gesture: GestureState,
    tracking: bool,
    settle: Option<SettleAnimation>,
    auto: AutoAdvance,
    last_commit: Option<Commit>,
}

impl<A: Adapter, S: Surface> PileLayout<A, S> {
    pub fn new(config: PileConfig, surface: S) -> Self {
        let mut auto = AutoAdvance::new(config.auto_advance_seconds());
        auto.start(None);
        Self {
            config,
            surface,
            adapter: None,
            bound: false,
            geometry: None,
            pool: SlotPool::default(),
            gesture: GestureState::default(),
            tracking: false,
            settle: None,
            auto,
            last_commit: None,
        }
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.gesture.mode
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    pub fn auto_advance(&self) -> &AutoAdvance {
        &self.auto
    }

    pub fn last_commit(&self) -> Option<Commit> {
        self.last_commit
    }

    /// Slots exist, sizes are known and there is data to show.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some()
            && self.pool.len() == SLOT_COUNT
            && self.adapter.as_ref().is_some_and(|a| a.item_count() > 0)
    }

    /// Data index currently shown by the main slot.
    pub fn main_index(&self) -> Result<Option<usize>> {
        self.data_index_at(MAIN)
    }

    /// Data index shown by the slot at pool position `index`.
    pub fn data_index_at(&self, index: usize) -> Result<Option<usize>> {
        let (Some(adapter), Some(slot)) = (self.adapter.as_ref(), self.pool.get(index)) else {
            return Ok(None);
        };
        data_index(slot.position, adapter.item_count()).map(Some)
    }

    /// Sizes the widget for `width` and returns `(width, height)`. Binds a
    /// pending adapter once the sizes are known.
    pub fn measure(&mut self, width: i32, padding_left: i32, padding_right: i32) -> Result<(i32, i32)> {
        let g = Geometry::compute(&self.config, width, padding_left, padding_right)?;
        debug!(
            "measured {}x{} slot {}x{} origins {:?}",
            g.width, g.height, g.slot_width, g.slot_height, g.origins
        );
        let size = (g.width, g.height);
        self.geometry = Some(g);

        if self.adapter.is_some() && !self.bound {
            self.bind_adapter()?;
        } else {
            self.layout();
        }
        Ok(size)
    }

    pub fn set_adapter(&mut self, adapter: A) -> Result<()> {
        self.adapter = Some(adapter);
        self.bound = false;
        if self.geometry.is_some() {
            self.bind_adapter()?;
        }
        Ok(())
    }

    /// Re-binds every slot against the adapter's current data.
    pub fn notify_data_set_changed(&mut self) -> Result<()> {
        if self.pool.is_empty() {
            return Ok(());
        }
        self.rebind(false)
    }

    fn bind_adapter(&mut self) -> Result<()> {
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(());
        };
        self.bound = true;
        if self.pool.is_empty() {
            info!(
                "creating {SLOT_COUNT} slots from template '{}'",
                adapter.layout_template()
            );
            self.pool = SlotPool::new(SLOT_COUNT);
        }
        self.layout();
        self.rebind(true)
    }

    fn rebind(&mut self, announce: bool) -> Result<()> {
        let Some(adapter) = self.adapter.as_mut() else {
            return Ok(());
        };
        let count = adapter.item_count();
        for slot in self.pool.iter() {
            let index = data_index(slot.position, count)?;
            debug!("bind slot {} position {} -> item {index}", slot.id, slot.position);
            adapter.bind(slot.id, index);
        }
        if announce {
            if let Some(main) = self.pool.get(MAIN) {
                let index = data_index(main.position, count)?;
                info!("displaying item {index}");
                adapter.on_displaying(index);
            }
        }
        Ok(())
    }

    /// Puts every slot at its rest bounds, depth and transform. Skipped while
    /// the hidden slot is being revealed by a drag.
    pub fn layout(&mut self) {
        if self.gesture.revealing_right {
            return;
        }
        let Some(g) = self.geometry.as_ref() else {
            return;
        };
        let variant = self.config.motion.variant;
        for (i, slot) in self.pool.iter_mut().enumerate() {
            slot.bounds = g.rest_bounds(i);
            slot.transform = Transform::at_rest(i, variant);
        }
        self.pool.restack();
        self.publish();
    }

    fn publish(&mut self) {
        for slot in self.pool.iter() {
            self.surface.place(slot);
        }
    }

    pub fn on_pointer(&mut self, ev: PointerEvent) -> Result<Dispatch> {
        if !self.is_ready() {
            if ev.kind == PointerKind::Down {
                warn!("pointer ignored: carousel has nothing to show");
            }
            return Ok(Dispatch::Pass);
        }

        match ev.kind {
            PointerKind::Down => {
                self.surface.set_parent_intercept(false);
                self.auto.stop();
                self.settle = None;
                let pressed = self.pool.hit_test(ev.x, ev.y);
                self.gesture.begin(ev.x, ev.y, pressed);
                self.tracking = true;
                Ok(Dispatch::Pass)
            }
            PointerKind::Move if !self.tracking => Ok(Dispatch::Pass),
            PointerKind::Move => match self.gesture.mode {
                Mode::Idle => match self.gesture.classify(ev.x, ev.y) {
                    Some(Mode::Horizontal) => {
                        debug!("horizontal drag claimed");
                        self.drag_to(ev.x)?;
                        Ok(Dispatch::Claim)
                    }
                    Some(Mode::Vertical) => {
                        debug!("vertical drag handed to parent");
                        self.surface.set_parent_intercept(true);
                        Ok(Dispatch::Pass)
                    }
                    _ => Ok(Dispatch::Pass),
                },
                Mode::Horizontal => {
                    self.drag_to(ev.x)?;
                    Ok(Dispatch::Claim)
                }
                Mode::Vertical => Ok(Dispatch::Pass),
            },
            PointerKind::Up | PointerKind::Cancel if !self.tracking => Ok(Dispatch::Pass),
            PointerKind::Up | PointerKind::Cancel => {
                self.tracking = false;
                let mode = self.gesture.mode;
                let outcome = if mode == Mode::Horizontal {
                    self.release(ev.time_ms).map(|_| ())
                } else if ev.kind == PointerKind::Up && self.gesture.is_tap() {
                    self.tap(ev.x, ev.y)
                } else {
                    Ok(())
                };
                self.gesture = GestureState::default();
                self.surface.set_parent_intercept(true);
                self.auto.start(Some(ev.time_ms));
                outcome?;
                Ok(if mode == Mode::Horizontal {
                    Dispatch::Claim
                } else {
                    Dispatch::Pass
                })
            }
        }
    }

    fn drag_to(&mut self, x: f32) -> Result<()> {
        let diff = self.gesture.advance(x);
        if diff == 0 {
            return Ok(());
        }
        let main_left = self.pool.get(MAIN).map_or(i32::MIN, Slot::left);
        if diff > 0 && !self.gesture.revealing_right && main_left >= 0 {
            self.reveal_right()?;
        }
        let regime = if self.gesture.revealing_right {
            Regime::RevealingRight
        } else {
            Regime::Dragging
        };
        self.shift_all(diff, regime);
        Ok(())
    }

    /// Pulls the last slot round to the hidden position so a rightward drag
    /// has something to bring in.
    fn reveal_right(&mut self) -> Result<()> {
        self.gesture.revealing_right = true;
        self.pool.rotate_to_front(LAST);
        self.rebind(false)?;

        let Some(g) = self.geometry.as_ref() else {
            return Ok(());
        };
        for (i, slot) in self.pool.iter_mut().enumerate() {
            let left = match i {
                0 | 1 => g.origins[i] - g.slot_width - g.interval,
                2 => g.origins[MAIN] + g.interval,
                _ => g.origins[i],
            };
            slot.move_to(left);
        }
        Ok(())
    }

    /// Undoes `reveal_right` before the release is evaluated, remembering
    /// whether the revealed slot came in far enough to force a commit.
    fn conceal_right(&mut self) -> Result<()> {
        self.gesture.revealing_right = false;
        if let Some(g) = self.geometry.as_ref() {
            let revealed_right = self.pool.get(MAIN).map_or(i32::MIN, Slot::right);
            self.gesture.force_right =
                self.config.motion.variant == Variant::Rich && revealed_right > g.slot_width / 2;
        }
        self.pool.rotate_to_back(HIDDEN);
        self.rebind(false)
    }

    fn shift_all(&mut self, diff: i32, regime: Regime) {
        let parallax = self.config.parallax_divisor();
        let variant = self.config.motion.variant;
        for (i, slot) in self.pool.iter_mut().enumerate() {
            slot.offset(if i < 2 { diff } else { diff / parallax });
            slot.transform = slot.transform.shifted(i, diff, regime, variant);
        }
        self.publish();
    }

    fn release(&mut self, now_ms: u64) -> Result<Option<Commit>> {
        if self.gesture.revealing_right {
            self.conceal_right()?;
        }
        let displacement = self.gesture.total_dx;
        let force_right = self.gesture.force_right;
        let animate = self.config.motion.variant == Variant::Rich;
        self.settle_after(displacement, false, force_right, now_ms, animate)
    }

    /// Commits or reverts, then returns every slot to rest, either directly
    /// or through the settle animation.
    fn settle_after(
        &mut self,
        displacement: i32,
        force_left: bool,
        force_right: bool,
        now_ms: u64,
        animate: bool,
    ) -> Result<Option<Commit>> {
        let Some(g) = self.geometry.clone() else {
            return Ok(None);
        };
        let half = g.slot_width / 2;
        let commit = if displacement > 0 && (force_right || displacement > half) {
            Some(Commit::Right)
        } else if displacement < 0 && (force_left || -displacement > half) {
            Some(Commit::Left)
        } else {
            None
        };

        match commit {
            Some(Commit::Right) => self.pool.rotate_to_front(LAST),
            Some(Commit::Left) => self.pool.rotate_to_back(HIDDEN),
            None => debug!("release reverted (displacement {displacement}px)"),
        }

        let start = self.pool.get(MAIN).map_or(g.origins[MAIN], Slot::left);
        self.layout();
        if animate && start != g.origins[MAIN] {
            let easing = Decelerate::new(self.config.motion.decelerate_factor);
            self.settle = Some(SettleAnimation::new(
                start,
                g.origins[MAIN],
                now_ms,
                self.config.motion.settle_ms,
                easing,
            ));
            self.shift_all(start - g.origins[MAIN], Regime::Dragging);
        }

        if let Some(c) = commit {
            info!("committed {c:?}");
            self.last_commit = Some(c);
            self.rebind(true)?;
        }
        Ok(commit)
    }

    fn tap(&mut self, x: f32, y: f32) -> Result<()> {
        let released = self.pool.hit_test(x, y);
        let Some(index) = self.gesture.pressed.filter(|p| Some(*p) == released) else {
            return Ok(());
        };
        if index < FIRST_FRAME_SHOW_INDEX {
            debug!("tap on hidden slot ignored");
            return Ok(());
        }
        let (Some(adapter), Some(slot)) = (self.adapter.as_mut(), self.pool.get(index)) else {
            return Ok(());
        };
        match data_index(slot.position, adapter.item_count()) {
            Ok(item) => {
                info!("click slot {} position {} -> item {item}", slot.id, slot.position);
                adapter.on_click(slot.id, item);
            }
            Err(e) => debug!("tap ignored: {e}"),
        }
        Ok(())
    }

    /// Advances the settle animation and the auto-advance timer to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        let frame = self.settle.as_ref().map(|anim| anim.sample(now_ms));
        if let Some((value, done)) = frame {
            if done {
                self.settle = None;
                self.layout();
            } else {
                let main_left = self.pool.get(MAIN).map_or(0, Slot::left);
                let dx = (value - main_left as f32).round() as i32;
                if dx != 0 {
                    self.shift_all(dx, Regime::Dragging);
                }
            }
        }

        if self.auto.poll(now_ms) {
            if let Err(e) = self.advance(now_ms) {
                error!("auto-advance failed: {e}");
                self.auto.disable();
            }
        }
    }

    /// One forced leftward commit, as fired by the auto-advance timer.
    pub fn advance(&mut self, now_ms: u64) -> Result<()> {
        if self.pool.is_empty() || self.tracking {
            return Ok(());
        }
        self.settle = None;
        self.settle_after(-1, true, false, now_ms, false)?;
        Ok(())
    }
}
