use alloc::vec::Vec;
use core::ops::Range;

use crate::provider::{ItemProvider, Placeable};
use crate::{Constraints, IntOffset, MeasureResult, MeasuredItem, StackConfig, StackState};

/// Computes which backing indexes a pass materializes.
///
/// The window starts at `first` and holds `visible_cards` items, or fewer when the collection
/// runs out. Returns an empty range when there are no items or `first` is past the end.
pub fn visible_window(first: usize, item_count: usize, visible_cards: usize) -> Range<usize> {
    if first >= item_count {
        return 0..0;
    }
    let span = visible_cards.max(1) - 1;
    if first.saturating_add(span) < item_count {
        first..first + span + 1
    } else {
        first..item_count
    }
}

/// The product of one layout pass.
///
/// The container always reports the full constraint bounds, regardless of the card sizes.
#[derive(Debug)]
pub struct StackLayout<'a, K, P> {
    pub width: u32,
    pub height: u32,
    pub window: Range<usize>,
    pub items: &'a [MeasuredItem<K, P>],
}

impl<K, P: Placeable> StackLayout<'_, K, P> {
    pub fn current_item(&self) -> Option<&MeasuredItem<K, P>> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Emits the placement of every content piece of every visible card, front card first.
    pub fn place(&self, mut f: impl FnMut(&MeasuredItem<K, P>, &P, crate::Placement)) {
        for item in self.items {
            item.place(|placeable, placement| f(item, placeable, placement));
        }
    }
}

/// Lays out a card stack, one pass per frame.
///
/// The policy owns a buffer of measured items sized to `visible_cards` and refills it in place
/// on every pass.
#[derive(Clone, Debug)]
pub struct MeasurePolicy<K, P> {
    config: StackConfig,
    items: Vec<MeasuredItem<K, P>>,
}

impl<K, P: Placeable> MeasurePolicy<K, P> {
    pub fn new(config: StackConfig) -> Self {
        Self {
            items: Vec::with_capacity(config.visible_cards()),
            config,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StackConfig) {
        let needed = config.visible_cards();
        if needed > self.items.capacity() {
            self.items.reserve_exact(needed - self.items.len());
        }
        self.config = config;
    }

    /// Runs one layout pass.
    ///
    /// Reads the live item count from `provider`, corrects the visible index in `state`, measures
    /// every item of the visible window under `constraints` and commits the result back to
    /// `state`. Empty and shrinking collections are absorbed here and never surface as errors.
    pub fn measure<I>(
        &mut self,
        state: &mut StackState,
        provider: &mut I,
        constraints: Constraints,
    ) -> StackLayout<'_, K, P>
    where
        I: ItemProvider<Key = K, Content = P> + ?Sized,
    {
        let item_count = provider.item_count();
        let anchor = state.resolve_anchor(item_count);
        let window = anchor.index().map_or(0..0, |first| {
            visible_window(first, item_count, self.config.visible_cards())
        });

        let child_constraints = Constraints::loose(constraints.max_width, constraints.max_height);
        let drag_offset = state.drag_offset().round();
        let rotation = state.rotation();

        self.items.clear();
        for (relative_index, index) in window.clone().enumerate() {
            let placeables = provider.measure(index, child_constraints);
            let key = provider.key(index);
            let front = relative_index == 0;
            self.items.push(MeasuredItem {
                key,
                index,
                relative_index,
                drag_offset: if front { drag_offset } else { IntOffset::ZERO },
                scale: if front { 1.0 } else { self.config.scale_factor },
                rotation: if front { rotation } else { 0.0 },
                placeables,
                offset_factor: self.config.offset_factor,
                stack_position: self.config.stack_position,
            });
        }

        state.set_premeasure_constraints(constraints);
        state.apply_measure_result(&MeasureResult {
            current_item: self.items.first(),
            item_count,
        });
        ctrace!(
            item_count,
            start = window.start,
            end = window.end,
            anchor = ?anchor,
            "MeasurePolicy::measure"
        );

        StackLayout {
            width: constraints.max_width,
            height: constraints.max_height,
            window,
            items: &self.items,
        }
    }
}
