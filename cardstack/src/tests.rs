use crate::*;

use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Card {
    width: u32,
    height: u32,
    draggable: bool,
}

impl Placeable for Card {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_drag_enabled(&self) -> bool {
        self.draggable
    }
}

/// Every item measures to a single card filling the constraints.
struct Deck {
    count: usize,
    measured: Vec<usize>,
    badge: bool,
}

impl Deck {
    fn new(count: usize) -> Self {
        Self {
            count,
            measured: Vec::new(),
            badge: false,
        }
    }
}

impl ItemProvider for Deck {
    type Key = u64;
    type Content = Card;

    fn item_count(&self) -> usize {
        self.count
    }

    fn key(&self, index: usize) -> u64 {
        1000 + index as u64
    }

    fn measure(&mut self, index: usize, constraints: Constraints) -> Vec<Card> {
        self.measured.push(index);
        let card = Card {
            width: constraints.max_width,
            height: constraints.max_height,
            draggable: true,
        };
        if self.badge {
            vec![
                card,
                Card {
                    width: 10,
                    height: 10,
                    draggable: false,
                },
            ]
        } else {
            vec![card]
        }
    }
}

fn run_pass(
    policy: &mut MeasurePolicy<u64, Card>,
    state: &mut StackState,
    deck: &mut Deck,
) -> (usize, Vec<usize>) {
    let layout = policy.measure(state, deck, Constraints::loose(300, 400));
    let indexes = layout.items.iter().map(|it| it.index).collect();
    (layout.items.len(), indexes)
}

#[test]
fn window_is_full_when_enough_items_remain() {
    assert_eq!(visible_window(0, 10, 3), 0..3);
    assert_eq!(visible_window(7, 10, 3), 7..10);
    assert_eq!(visible_window(8, 10, 3), 8..10);
    assert_eq!(visible_window(9, 10, 3), 9..10);
}

#[test]
fn window_handles_empty_and_past_end() {
    assert_eq!(visible_window(0, 0, 3), 0..0);
    assert_eq!(visible_window(5, 5, 3), 0..0);
    assert_eq!(visible_window(0, 1, 1), 0..1);
    assert_eq!(visible_window(0, 4, 0), 0..1);
}

#[test]
fn window_size_matches_remaining_items() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let count = rng.gen_range_usize(0, 40);
        let visible = rng.gen_range_usize(1, 8);
        let first = rng.gen_range_usize(0, 45);
        let w = visible_window(first, count, visible);
        if first >= count {
            assert!(w.is_empty());
            continue;
        }
        assert_eq!(w.start, first);
        assert_eq!(w.len(), visible.min(count - first));
        assert!(w.end <= count);
    }
}

#[test]
fn back_card_offsets_grow_with_depth() {
    let p = StackPosition::Right;
    assert_eq!(stacked_offset(300, 400, 1, 0.03, p), IntOffset::new(9, 0));
    assert_eq!(stacked_offset(300, 400, 2, 0.03, p), IntOffset::new(18, 0));
    assert_eq!(
        stacked_offset(300, 400, 1, 0.03, StackPosition::Left),
        IntOffset::new(-9, 0)
    );

    let mut last = 0;
    for depth in 1..10 {
        let off = stacked_offset(300, 400, depth, 0.05, StackPosition::Left);
        assert_eq!(off.y, 0);
        assert!(off.x.abs() > last);
        last = off.x.abs();
    }
}

#[test]
fn vertical_offsets_are_compressed() {
    // Square content so the horizontal and vertical inputs match.
    for depth in 1..6 {
        let right = stacked_offset(500, 500, depth, 0.04, StackPosition::Right);
        let bottom = stacked_offset(500, 500, depth, 0.04, StackPosition::Bottom);
        let top = stacked_offset(500, 500, depth, 0.04, StackPosition::Top);
        let expected = libm::roundf(500.0 * depth as f32 * 0.04 * 0.8) as i32;
        assert_eq!(bottom, IntOffset::new(0, expected));
        assert_eq!(top, IntOffset::new(0, -expected));
        assert!(bottom.y < right.x);
    }
}

#[test]
fn offset_rounds_half_away_from_zero() {
    assert_eq!(Offset::new(2.5, -2.5).round(), IntOffset::new(3, -3));
    assert_eq!(Offset::new(0.49, -0.49).round(), IntOffset::ZERO);
    assert_eq!(Offset::new(10.6, -7.6).round(), IntOffset::new(11, -8));
}

#[test]
fn rounding_is_exact_near_half_and_for_large_values() {
    // Largest f32 below 0.5: adding 0.5 would round up before truncation.
    assert_eq!(
        Offset::new(0.49999997, -0.49999997).round(),
        IntOffset::ZERO
    );
    // Odd integers above 2^23 have no fractional part to nudge.
    assert_eq!(Offset::new(8388609.0, 0.0).round().x, 8388609);
    assert_eq!(Offset::new(-8388609.0, 0.0).round().x, -8388609);
}

#[test]
fn front_card_follows_drag_and_back_cards_are_scaled() {
    let config = StackConfig::default()
        .with_visible_cards(3)
        .with_scale_factor(0.9)
        .with_offset_factor(0.03)
        .with_stack_position(StackPosition::Right);
    let mut policy = MeasurePolicy::new(config);
    let mut state = StackState::new();
    state.set_drag(Offset::new(12.4, -3.6), 15.0);
    let mut deck = Deck::new(5);

    let layout = policy.measure(&mut state, &mut deck, Constraints::loose(300, 400));
    assert_eq!(layout.width, 300);
    assert_eq!(layout.height, 400);

    let mut placements = Vec::new();
    layout.place(|item, _, placement| placements.push((item.relative_index, placement)));
    assert_eq!(placements.len(), 3);

    let (rel, front) = placements[0];
    assert_eq!(rel, 0);
    assert_eq!(front.offset, IntOffset::new(12, -4));
    assert_eq!(front.z_index, FRONT_Z_INDEX);
    assert_eq!(front.layer.rotation_z, 15.0);
    assert_eq!(front.layer.scale_x, 1.0);

    let (_, second) = placements[1];
    assert_eq!(second.offset, IntOffset::new(9, 0));
    assert_eq!(second.z_index, -1.0);
    assert_eq!(second.layer.scale_x, 0.9);
    assert_eq!(second.layer.rotation_z, 0.0);
    assert!((second.layer.translation_x - -15.0).abs() < 1e-3);
    assert!((second.layer.translation_y - -20.0).abs() < 1e-3);

    let (_, third) = placements[2];
    assert_eq!(third.offset, IntOffset::new(18, 0));
    assert!(third.z_index < second.z_index);
    assert!(second.z_index < front.z_index);
}

#[test]
fn drag_disabled_content_stays_put() {
    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::new();
    state.set_drag(Offset::new(40.0, 8.0), -12.0);
    let mut deck = Deck::new(2);
    deck.badge = true;

    let layout = policy.measure(&mut state, &mut deck, Constraints::loose(200, 200));
    let front = layout.current_item().unwrap();
    let mut placements = Vec::new();
    front.place(|card, placement| placements.push((*card, placement)));
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].1.offset, IntOffset::new(40, 8));
    assert_eq!(placements[0].1.layer.rotation_z, -12.0);
    assert!(!placements[1].0.draggable);
    assert_eq!(placements[1].1.offset, IntOffset::ZERO);
    assert_eq!(placements[1].1.layer.rotation_z, 0.0);
    assert_eq!(placements[1].1.z_index, FRONT_Z_INDEX);
}

#[test]
fn exactly_one_front_card_per_pass() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 20);
        let visible = rng.gen_range_usize(1, 6);
        let mut policy = MeasurePolicy::new(StackConfig::default().with_visible_cards(visible));
        let mut state = StackState::with_initial_index(rng.gen_range_usize(0, 25));
        let mut deck = Deck::new(count);

        let layout = policy.measure(&mut state, &mut deck, Constraints::loose(100, 100));
        let fronts = layout.items.iter().filter(|it| it.is_front()).count();
        assert!(layout.items.len() <= visible);
        assert_eq!(deck.measured.len(), layout.items.len());
        if count == 0 {
            assert_eq!(fronts, 0);
            assert!(layout.current_item().is_none());
        } else {
            assert_eq!(fronts, 1);
            assert!(state.visible_item_index() < count);
        }
        for (rel, item) in layout.items.iter().enumerate() {
            assert_eq!(item.relative_index, rel);
        }
    }
}

#[test]
fn only_the_front_card_carries_drag() {
    let mut policy = MeasurePolicy::new(StackConfig::default().with_visible_cards(4));
    let mut state = StackState::new();
    state.set_drag(Offset::new(5.0, 5.0), 3.0);
    let mut deck = Deck::new(10);

    let layout = policy.measure(&mut state, &mut deck, Constraints::loose(100, 100));
    for item in &layout.items[1..] {
        assert_eq!(item.drag_offset, IntOffset::ZERO);
        assert_eq!(item.rotation, 0.0);
        assert_eq!(item.scale, 0.95);
    }
    assert_eq!(layout.items[0].key, 1000);
    assert_eq!(layout.items[3].key, 1003);
}

#[test]
fn retreat_from_zero_stays_at_zero() {
    let mut state = StackState::new();
    assert_eq!(state.retreat(0), 0);
    assert_eq!(state.visible_item_index(), 0);
}

#[test]
fn advance_past_end_is_clamped_by_the_next_pass() {
    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::with_initial_index(4);
    let mut deck = Deck::new(5);
    run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.visible_item_index(), 4);

    assert_eq!(state.advance(4), 5);
    assert!(state.is_remeasure_requested());
    assert_eq!(state.resolve_anchor(5), WindowAnchor::Clamped(4));

    let (len, indexes) = run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.visible_item_index(), 4);
    assert_eq!(len, 1);
    assert_eq!(indexes, vec![4]);
    assert!(!state.is_remeasure_requested());
}

#[test]
fn shrinking_collection_clamps_the_index() {
    let mut policy = MeasurePolicy::new(StackConfig::default().with_visible_cards(3));
    let mut state = StackState::with_initial_index(4);
    let mut deck = Deck::new(5);
    run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.last_known_item_count(), 5);

    deck.count = 2;
    assert_eq!(
        state.update_scroll_position_if_first_item_was_deleted(2, 4),
        1
    );
    let (_, indexes) = run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.visible_item_index(), 1);
    assert_eq!(indexes, vec![1]);
    assert_eq!(state.last_known_item_count(), 2);
}

#[test]
fn empty_collection_renders_nothing() {
    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::with_initial_index(3);
    let mut deck = Deck::new(0);

    let layout = policy.measure(&mut state, &mut deck, Constraints::loose(320, 480));
    assert!(layout.is_empty());
    assert!(layout.window.is_empty());
    // The container still fills its bounds.
    assert_eq!((layout.width, layout.height), (320, 480));
    assert!(deck.measured.is_empty());
    assert!(!state.has_current_item());
    assert_eq!(state.visible_item_index(), 0);
    assert_eq!(state.resolve_anchor(0), WindowAnchor::Empty);
}

#[test]
fn advance_then_retreat_returns_to_the_same_card() {
    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::with_initial_index(2);
    let mut deck = Deck::new(6);
    run_pass(&mut policy, &mut state, &mut deck);

    let current = state.visible_item_index();
    state.advance(current);
    run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.visible_item_index(), 3);

    let current = state.visible_item_index();
    state.retreat(current);
    run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(state.visible_item_index(), 2);
}

#[test]
fn snap_keeps_drag_and_requests_layout() {
    let mut state = StackState::new();
    state.set_drag(Offset::new(1.0, 2.0), 4.0);
    state.snap_to(7);
    assert_eq!(state.visible_item_index(), 7);
    assert_eq!(state.drag_offset(), Offset::new(1.0, 2.0));
    assert_eq!(state.rotation(), 4.0);
    assert!(state.take_remeasure_request());
    assert!(!state.take_remeasure_request());
}

#[test]
fn pass_records_constraints_and_count() {
    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::new();
    let mut deck = Deck::new(3);
    assert_eq!(state.premeasure_constraints(), None);

    policy.measure(&mut state, &mut deck, Constraints::fixed(50, 60));
    assert_eq!(state.premeasure_constraints(), Some(Constraints::fixed(50, 60)));
    assert_eq!(state.passes(), 1);
    assert!(state.has_current_item());
}

#[test]
fn children_are_measured_with_loose_container_bounds() {
    struct Probe(Vec<Constraints>);
    impl ItemProvider for Probe {
        type Key = usize;
        type Content = Card;

        fn item_count(&self) -> usize {
            3
        }

        fn key(&self, index: usize) -> usize {
            index
        }

        fn measure(&mut self, _index: usize, constraints: Constraints) -> Vec<Card> {
            self.0.push(constraints);
            Vec::new()
        }
    }

    let mut policy = MeasurePolicy::new(StackConfig::default());
    let mut state = StackState::new();
    let mut probe = Probe(Vec::new());
    let layout = policy.measure(&mut state, &mut probe, Constraints::fixed(80, 90));
    assert_eq!(layout.items.len(), 3);
    assert_eq!(probe.0, vec![Constraints::loose(80, 90); 3]);
}

#[test]
fn snapshot_round_trip_restores_position() {
    let mut state = StackState::with_initial_index(6);
    let snap = state.snapshot();
    state.snap_to(0);
    state.take_remeasure_request();

    state.restore(snap);
    assert_eq!(state.visible_item_index(), 6);
    assert!(state.is_remeasure_requested());
}

#[test]
fn config_never_drops_below_one_visible_card() {
    assert_eq!(StackConfig::default().with_visible_cards(0).visible_cards, 1);
    assert_eq!(
        StackConfig::new(0, 1.0, 0.0, StackPosition::Top).visible_cards(),
        1
    );

    let mut policy = MeasurePolicy::new(StackConfig::default());
    policy.set_config(StackConfig::default().with_visible_cards(6));
    let mut state = StackState::new();
    let mut deck = Deck::new(10);
    let (len, _) = run_pass(&mut policy, &mut state, &mut deck);
    assert_eq!(len, 6);
}

#[test]
fn randomized_navigation_never_escapes_the_collection() {
    let mut rng = Lcg::new(0xC0FFEE);
    let mut policy = MeasurePolicy::new(StackConfig::default().with_visible_cards(3));
    let mut state = StackState::new();
    let mut deck = Deck::new(8);

    for _ in 0..1000 {
        match rng.gen_range_usize(0, 5) {
            0 => {
                let cur = state.visible_item_index();
                state.advance(cur);
            }
            1 => {
                let cur = state.visible_item_index();
                state.retreat(cur);
            }
            2 => state.snap_to(rng.gen_range_usize(0, 20)),
            3 => deck.count = rng.gen_range_usize(0, 12),
            _ => {}
        }
        let (len, indexes) = run_pass(&mut policy, &mut state, &mut deck);
        if deck.count == 0 {
            assert_eq!(len, 0);
            assert_eq!(state.visible_item_index(), 0);
        } else {
            assert!(state.visible_item_index() < deck.count);
            assert_eq!(indexes[0], state.visible_item_index());
            assert_eq!(len, 3.min(deck.count - state.visible_item_index()));
        }
    }
}
