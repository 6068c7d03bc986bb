use pile::demo::{DemoAdapter, RecordingSurface};
use pile::{
    Commit, Dispatch, Mode, PileConfig, PileError, PileLayout, PointerEvent, PointerKind, Variant,
};

type Layout = PileLayout<DemoAdapter, RecordingSurface>;

const WIDTH: i32 = 1080; // slot width 990, half 495

fn ready_with(cfg: PileConfig, items: usize) -> Layout {
    let mut layout = PileLayout::new(cfg, RecordingSurface::default());
    layout.set_adapter(DemoAdapter::with_items(items)).unwrap();
    layout.measure(WIDTH, 0, 0).unwrap();
    layout
}

fn ready(items: usize) -> Layout {
    ready_with(PileConfig::default(), items)
}

fn ev(kind: PointerKind, x: f32, y: f32, t: u64) -> PointerEvent {
    PointerEvent::new(kind, x, y, t)
}

/// Horizontal drag from `x0` to `x1` in two samples, released at `x1`.
fn drag(layout: &mut Layout, x0: f32, x1: f32, t: u64) -> Vec<Dispatch> {
    let mid = x0 + (x1 - x0) / 2.0;
    [
        ev(PointerKind::Down, x0, 100.0, t),
        ev(PointerKind::Move, mid, 100.0, t + 16),
        ev(PointerKind::Move, x1, 100.0, t + 32),
        ev(PointerKind::Up, x1, 100.0, t + 48),
    ]
    .into_iter()
    .map(|e| layout.on_pointer(e).unwrap())
    .collect()
}

fn main_index(layout: &Layout) -> usize {
    layout.main_index().unwrap().unwrap()
}

fn assert_contiguous(layout: &Layout) {
    let mut p = layout.pool().positions();
    p.sort_unstable();
    assert_eq!(p.len(), 4);
    for w in p.windows(2) {
        assert_eq!(w[1], w[0] + 1, "positions {p:?}");
    }
}

#[test]
fn binds_and_announces_first_item() {
    let layout = ready(5);
    let adapter = layout.adapter().unwrap();
    assert_eq!(adapter.displayed, vec![0]);
    assert_eq!(layout.pool().positions(), vec![-1, 0, 1, 2]);
    // hidden slot shows the last item
    assert_eq!(adapter.bound.get(&0), Some(&4));
    assert_eq!(adapter.bound.get(&1), Some(&0));
    assert_eq!(layout.surface().frames.len(), 4);
}

#[test]
fn rest_layout_matches_geometry() {
    let layout = ready(5);
    let g = layout.geometry().unwrap();
    assert_eq!(g.slot_width, 990);
    assert_eq!(g.slot_height, 603);
    assert_eq!(g.origins, [-1020, 0, 130, 260]);
    let lefts: Vec<_> = layout.pool().iter().map(|s| s.left()).collect();
    assert_eq!(lefts, vec![-1020, 0, 130, 260]);
    let depths: Vec<_> = layout.pool().iter().map(|s| s.depth).collect();
    assert_eq!(depths, vec![3, 3, 2, 1]);
}

#[test]
fn adapter_set_before_measure_binds_on_measure() {
    let mut layout = PileLayout::new(PileConfig::default(), RecordingSurface::default());
    layout.set_adapter(DemoAdapter::with_items(3)).unwrap();
    assert!(layout.pool().is_empty());
    assert!(!layout.is_ready());
    layout.measure(WIDTH, 10, 10).unwrap();
    assert!(layout.is_ready());
    assert_eq!(layout.geometry().unwrap().slot_width, 970);
}

#[test]
fn three_leftward_drags_advance_one_item_each() {
    let mut layout = ready(5);
    let mut seen = vec![];
    for i in 0..3 {
        drag(&mut layout, 800.0, 200.0, 1_000 * (i + 1));
        assert_eq!(layout.last_commit(), Some(Commit::Left));
        seen.push(main_index(&layout));
        assert_contiguous(&layout);
    }
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(layout.adapter().unwrap().displayed, vec![0, 1, 2, 3]);
}

#[test]
fn auto_advance_commits_leftward() {
    let mut layout = ready(5);
    layout.tick(0);
    let mut seen = vec![];
    for t in [5_000, 10_000, 15_000] {
        layout.tick(t - 1);
        assert_eq!(seen.len(), (t / 5_000 - 1) as usize);
        layout.tick(t);
        seen.push(main_index(&layout));
    }
    assert_eq!(seen, vec![1, 2, 3]);
    // timer commits snap without animating
    assert!(!layout.is_settling());
}

#[test]
fn right_drag_past_half_commits_rightward() {
    let mut layout = ready(5);
    let dispatch = drag(&mut layout, 200.0, 800.0, 1_000);
    assert_eq!(dispatch[1], Dispatch::Claim);
    assert_eq!(layout.last_commit(), Some(Commit::Right));
    assert_eq!(layout.pool().positions(), vec![-2, -1, 0, 1]);
    assert_eq!(main_index(&layout), 4);
    assert_eq!(layout.adapter().unwrap().displayed, vec![0, 4]);
}

#[test]
fn right_drag_of_a_third_reverts() {
    let mut layout = ready(5);
    let before = layout.adapter().unwrap().bound.clone();
    drag(&mut layout, 200.0, 530.0, 1_000);
    assert_eq!(layout.last_commit(), None);
    assert_eq!(layout.pool().positions(), vec![-1, 0, 1, 2]);
    assert_eq!(main_index(&layout), 0);
    assert_eq!(layout.adapter().unwrap().bound, before);
    assert_eq!(layout.adapter().unwrap().displayed, vec![0]);
}

/// Left commit, then a frame 12 ms into the settle so the main slot sits at
/// +41 px, then a 490 px net rightward gesture: short of half a slot, but the
/// revealed slot's right edge ends at 500 px.
fn short_right_gesture_from_unsettled_pile(layout: &mut Layout) {
    drag(layout, 800.0, 200.0, 1_000);
    assert_eq!(layout.last_commit(), Some(Commit::Left));
    layout.tick(1_060);
    for e in [
        ev(PointerKind::Down, 500.0, 100.0, 1_100),
        ev(PointerKind::Move, 460.0, 100.0, 1_116),
        ev(PointerKind::Move, 990.0, 100.0, 1_132),
        ev(PointerKind::Up, 990.0, 100.0, 1_148),
    ] {
        layout.on_pointer(e).unwrap();
    }
}

#[test]
fn revealed_slot_past_half_forces_right_commit() {
    let mut layout = ready(5);
    short_right_gesture_from_unsettled_pile(&mut layout);
    assert_eq!(layout.last_commit(), Some(Commit::Right));
    assert_eq!(main_index(&layout), 0);
    assert_eq!(layout.adapter().unwrap().displayed, vec![0, 1, 0]);
    assert_contiguous(&layout);
}

#[test]
fn simplified_variant_never_forces_a_commit() {
    let mut cfg = PileConfig::default();
    cfg.motion.variant = Variant::Simplified;
    let mut layout = ready_with(cfg, 5);
    short_right_gesture_from_unsettled_pile(&mut layout);
    assert_eq!(layout.last_commit(), Some(Commit::Left));
    assert_eq!(main_index(&layout), 1);
    assert_eq!(layout.adapter().unwrap().displayed, vec![0, 1]);
}

#[test]
fn left_drag_short_of_half_reverts() {
    let mut layout = ready(5);
    drag(&mut layout, 800.0, 400.0, 1_000);
    assert_eq!(layout.last_commit(), None);
    assert_eq!(main_index(&layout), 0);
}

#[test]
fn left_then_right_returns_to_same_item() {
    let mut layout = ready(3);
    drag(&mut layout, 800.0, 200.0, 1_000);
    assert_eq!(main_index(&layout), 1);
    layout.tick(2_000);
    drag(&mut layout, 200.0, 800.0, 3_000);
    assert_eq!(main_index(&layout), 0);
    layout.tick(4_000);
    drag(&mut layout, 200.0, 800.0, 5_000);
    assert_eq!(main_index(&layout), 2);
    assert_contiguous(&layout);
}

#[test]
fn first_rightward_sample_reveals_hidden_slot() {
    let mut layout = ready(5);
    layout.on_pointer(ev(PointerKind::Down, 200.0, 100.0, 0)).unwrap();
    let d = layout.on_pointer(ev(PointerKind::Move, 260.0, 100.0, 16)).unwrap();
    assert_eq!(d, Dispatch::Claim);
    assert_eq!(layout.mode(), Mode::Horizontal);
    assert_eq!(layout.pool().positions(), vec![-2, -1, 0, 1]);
    // revealed slot sits one slot width left of the main origin, then follows the drag
    assert_eq!(layout.pool().get(1).unwrap().left(), -1020 + 60);
    assert!(!layout.surface().parent_intercept);

    layout.on_pointer(ev(PointerKind::Cancel, 260.0, 100.0, 32)).unwrap();
    assert_eq!(layout.pool().positions(), vec![-1, 0, 1, 2]);
    assert!(layout.surface().parent_intercept);
}

#[test]
fn vertical_gesture_never_rotates_or_clicks() {
    let mut layout = ready(5);
    let before = layout.pool().positions();
    assert_eq!(
        layout.on_pointer(ev(PointerKind::Down, 400.0, 100.0, 0)).unwrap(),
        Dispatch::Pass
    );
    assert!(!layout.surface().parent_intercept);
    assert_eq!(
        layout.on_pointer(ev(PointerKind::Move, 420.0, 300.0, 16)).unwrap(),
        Dispatch::Pass
    );
    assert_eq!(layout.mode(), Mode::Vertical);
    assert!(layout.surface().parent_intercept);
    // later sideways motion is ignored
    layout.on_pointer(ev(PointerKind::Move, 900.0, 310.0, 32)).unwrap();
    layout.on_pointer(ev(PointerKind::Up, 900.0, 310.0, 48)).unwrap();

    assert_eq!(layout.pool().positions(), before);
    assert!(layout.adapter().unwrap().clicks.is_empty());
    assert_eq!(layout.adapter().unwrap().displayed, vec![0]);
}

#[test]
fn tap_clicks_the_slot_under_the_pointer() {
    let mut layout = ready(5);
    layout.on_pointer(ev(PointerKind::Down, 400.0, 150.0, 0)).unwrap();
    layout.on_pointer(ev(PointerKind::Up, 400.0, 150.0, 60)).unwrap();
    // peeking second slot
    layout.on_pointer(ev(PointerKind::Down, 1000.0, 300.0, 100)).unwrap();
    layout.on_pointer(ev(PointerKind::Up, 1000.0, 300.0, 160)).unwrap();
    assert_eq!(layout.adapter().unwrap().clicks, vec![0, 1]);
}

#[test]
fn tie_move_still_taps_but_cancel_does_not() {
    let mut layout = ready(5);
    layout.on_pointer(ev(PointerKind::Down, 400.0, 150.0, 0)).unwrap();
    layout.on_pointer(ev(PointerKind::Move, 403.0, 153.0, 16)).unwrap();
    assert_eq!(layout.mode(), Mode::Idle);
    layout.on_pointer(ev(PointerKind::Up, 403.0, 153.0, 32)).unwrap();

    layout.on_pointer(ev(PointerKind::Down, 400.0, 150.0, 100)).unwrap();
    layout.on_pointer(ev(PointerKind::Cancel, 400.0, 150.0, 116)).unwrap();
    assert_eq!(layout.adapter().unwrap().clicks, vec![0]);
}

#[test]
fn settle_animation_eases_back_and_is_cancelled_by_down() {
    let mut layout = ready(5);
    drag(&mut layout, 800.0, 200.0, 0);
    assert!(layout.is_settling());
    let start = layout.pool().get(1).unwrap().left();
    assert!(start > 0);

    layout.tick(148);
    let mid = layout.pool().get(1).unwrap().left();
    assert!(mid > 0 && mid < start, "mid {mid} start {start}");
    assert_eq!(layout.surface().frames[&layout.pool().get(1).unwrap().id].bounds.left, mid);

    layout.on_pointer(ev(PointerKind::Down, 500.0, 100.0, 200)).unwrap();
    assert!(!layout.is_settling());
    assert_eq!(layout.pool().get(1).unwrap().left(), mid);
    layout.on_pointer(ev(PointerKind::Up, 500.0, 100.0, 216)).unwrap();
}

#[test]
fn settle_animation_ends_at_rest() {
    let mut layout = ready(5);
    drag(&mut layout, 200.0, 800.0, 0);
    for t in (64..=448).step_by(16) {
        layout.tick(t);
    }
    assert!(!layout.is_settling());
    let lefts: Vec<_> = layout.pool().iter().map(|s| s.left()).collect();
    assert_eq!(lefts, vec![-1020, 0, 130, 260]);
    let alphas: Vec<_> = layout.pool().iter().map(|s| s.transform.alpha).collect();
    assert_eq!(alphas, vec![1.0, 1.0, 0.8, 0.4]);
}

#[test]
fn pointer_down_stops_and_release_rearms_auto_advance() {
    let mut layout = ready(5);
    layout.tick(0);
    layout.on_pointer(ev(PointerKind::Down, 400.0, 100.0, 4_000)).unwrap();
    assert!(!layout.auto_advance().is_running());
    layout.tick(6_000);
    assert_eq!(main_index(&layout), 0);
    layout.on_pointer(ev(PointerKind::Move, 400.0, 300.0, 4_016)).unwrap();
    layout.on_pointer(ev(PointerKind::Up, 400.0, 300.0, 7_000)).unwrap();
    assert!(layout.auto_advance().is_running());
    assert_eq!(layout.auto_advance().deadline(), Some(12_000));
    layout.tick(11_999);
    assert_eq!(main_index(&layout), 0);
    layout.tick(12_000);
    assert_eq!(main_index(&layout), 1);
}

#[test]
fn empty_adapter_fails_fast_and_ignores_gestures() {
    let mut layout = PileLayout::new(PileConfig::default(), RecordingSurface::default());
    layout.measure(WIDTH, 0, 0).unwrap();
    assert_eq!(
        layout.set_adapter(DemoAdapter::with_items(0)),
        Err(PileError::EmptyAdapter)
    );
    assert!(!layout.is_ready());
    assert_eq!(layout.notify_data_set_changed(), Err(PileError::EmptyAdapter));
    let before = layout.pool().positions();
    drag(&mut layout, 800.0, 200.0, 0);
    assert_eq!(layout.pool().positions(), before);
}

#[test]
fn timer_failure_disables_auto_advance() {
    let mut layout = ready(5);
    layout.tick(0);
    layout.adapter_mut().unwrap().urls.clear();
    layout.tick(5_000);
    assert!(!layout.auto_advance().is_enabled());
    layout.adapter_mut().unwrap().urls = vec!["a".into(), "b".into()];
    layout.tick(20_000);
    assert!(!layout.auto_advance().is_enabled());
    assert_contiguous(&layout);
}

#[test]
fn data_changes_rebind_against_new_count() {
    let mut layout = ready(5);
    layout.adapter_mut().unwrap().urls.truncate(3);
    layout.notify_data_set_changed().unwrap();
    // hidden slot (position -1) now maps to the last of three items
    assert_eq!(layout.adapter().unwrap().bound.get(&0), Some(&2));
    assert_eq!(layout.adapter().unwrap().bound.get(&3), Some(&2));
}

#[test]
fn events_before_ready_pass_through() {
    let mut layout: Layout = PileLayout::new(PileConfig::default(), RecordingSurface::default());
    let d = layout.on_pointer(ev(PointerKind::Down, 1.0, 1.0, 0)).unwrap();
    assert_eq!(d, Dispatch::Pass);
    layout.tick(100_000);
    assert!(layout.pool().is_empty());
}

#[test]
fn simplified_variant_snaps_without_timer() {
    let mut cfg = PileConfig::default();
    cfg.motion.variant = Variant::Simplified;
    let mut layout = ready_with(cfg, 5);
    assert!(!layout.auto_advance().is_enabled());

    layout.on_pointer(ev(PointerKind::Down, 800.0, 100.0, 0)).unwrap();
    layout.on_pointer(ev(PointerKind::Move, 500.0, 100.0, 16)).unwrap();
    let t = layout.pool().get(2).unwrap().transform;
    assert_eq!((t.alpha, t.scale_x), (0.6, 0.85));
    // back slots move at a tenth of the drag
    assert_eq!(layout.pool().get(2).unwrap().left(), 130 - 30);
    layout.on_pointer(ev(PointerKind::Move, 200.0, 100.0, 32)).unwrap();
    layout.on_pointer(ev(PointerKind::Up, 200.0, 100.0, 48)).unwrap();

    assert_eq!(main_index(&layout), 1);
    assert!(!layout.is_settling());
    let lefts: Vec<_> = layout.pool().iter().map(|s| s.left()).collect();
    assert_eq!(lefts, vec![-1020, 0, 130, 260]);
    layout.tick(60_000);
    assert_eq!(main_index(&layout), 1);
}

#[test]
fn huge_width_and_padding_are_rejected_not_overflowed() {
    let mut layout: Layout = PileLayout::new(PileConfig::default(), RecordingSurface::default());
    assert!(matches!(
        layout.measure(i32::MIN, 100, 0),
        Err(PileError::InvalidGeometry { .. })
    ));
    assert!(matches!(
        layout.measure(i32::MAX, 0, 0),
        Err(PileError::InvalidGeometry { .. })
    ));
}

#[test]
fn oversized_interval_is_rejected_not_overflowed() {
    // built directly, bypassing config validation
    let mut cfg = PileConfig::default();
    cfg.layout.interval = 1e9;
    let mut layout: Layout = PileLayout::new(cfg, RecordingSurface::default());
    assert_eq!(
        layout.measure(WIDTH, 0, 0),
        Err(PileError::InvalidGeometry {
            width: WIDTH,
            slot_width: 0
        })
    );
    assert!(PileConfig::from_toml("[layout]\ninterval = 1e9\n").is_err());
}

#[test]
fn too_narrow_width_is_rejected() {
    let mut layout: Layout = PileLayout::new(PileConfig::default(), RecordingSurface::default());
    assert_eq!(
        layout.measure(90, 0, 0),
        Err(PileError::InvalidGeometry {
            width: 90,
            slot_width: 0
        })
    );
}
