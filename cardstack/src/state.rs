use crate::{Constraints, MeasureResult, Offset};

/// Where a layout pass anchors its visible window.
///
/// Resolved at the start of every pass from the stored index and the live item count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowAnchor {
    /// No items: nothing is measured.
    Empty,
    /// The stored index is in range.
    Valid(usize),
    /// The stored index was past the end and has been pulled back to the last item.
    Clamped(usize),
}

impl WindowAnchor {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Valid(i) | Self::Clamped(i) => Some(i),
        }
    }
}

/// A serializable snapshot of the navigation position, for saving and restoring a stack.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackSnapshot {
    pub visible_item_index: usize,
}

/// Navigation and drag state of a card stack.
///
/// This is the only piece of the stack that lives across frames. It is written by three parties:
/// - the gesture layer, through [`Self::set_drag`] on every drag tick,
/// - navigation requests ([`Self::snap_to`], [`Self::advance`], [`Self::retreat`]),
/// - the layout pass, which corrects the index and records the item count.
///
/// The type itself is synchronous. Awaitable navigation lives in `cardstack-adapter`.
#[derive(Clone, Debug, Default)]
pub struct StackState {
    visible_item_index: usize,
    drag_offset: Offset,
    rotation: f32,
    last_known_item_count: usize,
    has_current_item: bool,
    remeasure_requested: bool,
    premeasure_constraints: Option<Constraints>,
    passes: u64,
}

impl StackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_index(visible_item_index: usize) -> Self {
        Self {
            visible_item_index,
            ..Self::default()
        }
    }

    pub fn visible_item_index(&self) -> usize {
        self.visible_item_index
    }

    pub fn drag_offset(&self) -> Offset {
        self.drag_offset
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Item count seen by the most recent layout pass.
    pub fn last_known_item_count(&self) -> usize {
        self.last_known_item_count
    }

    /// Whether the most recent layout pass had a front card.
    pub fn has_current_item(&self) -> bool {
        self.has_current_item
    }

    /// Number of layout passes applied so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Container constraints of the most recent layout pass.
    pub fn premeasure_constraints(&self) -> Option<Constraints> {
        self.premeasure_constraints
    }

    pub(crate) fn set_premeasure_constraints(&mut self, constraints: Constraints) {
        self.premeasure_constraints = Some(constraints);
    }

    /// Records the live drag displacement and rotation of the front card.
    pub fn set_drag(&mut self, offset: Offset, rotation: f32) {
        self.drag_offset = offset;
        self.rotation = rotation;
    }

    pub fn reset_drag(&mut self) {
        self.set_drag(Offset::ZERO, 0.0);
    }

    /// Sets the visible index and asks for a new layout pass.
    ///
    /// The index is not checked against the item count here: the next pass clamps it.
    /// Drag offset and rotation are left untouched.
    pub fn snap_to(&mut self, index: usize) {
        ctrace!(from = self.visible_item_index, to = index, "StackState::snap_to");
        self.visible_item_index = index;
        self.remeasure_requested = true;
    }

    /// Requests the item after `current_index`. Returns the requested index.
    pub fn advance(&mut self, current_index: usize) -> usize {
        let target = Self::advance_target(current_index);
        self.snap_to(target);
        target
    }

    /// Requests the item before `current_index`, never going below 0. Returns the requested index.
    pub fn retreat(&mut self, current_index: usize) -> usize {
        let target = Self::retreat_target(current_index);
        self.snap_to(target);
        target
    }

    pub fn advance_target(current_index: usize) -> usize {
        current_index.saturating_add(1)
    }

    pub fn retreat_target(current_index: usize) -> usize {
        current_index.saturating_sub(1)
    }

    /// Returns and clears the pending "please lay out again" flag.
    pub fn take_remeasure_request(&mut self) -> bool {
        core::mem::take(&mut self.remeasure_requested)
    }

    pub fn is_remeasure_requested(&self) -> bool {
        self.remeasure_requested
    }

    /// Pulls `current_index` back into range after items were removed.
    ///
    /// Returns `item_count - 1` when `current_index` is past the end, otherwise `current_index`.
    /// This only computes the index; the layout pass commits it through
    /// [`Self::apply_measure_result`].
    pub fn update_scroll_position_if_first_item_was_deleted(
        &self,
        item_count: usize,
        current_index: usize,
    ) -> usize {
        if item_count == 0 || current_index < item_count {
            return current_index;
        }
        item_count - 1
    }

    /// Resolves the window anchor for a pass over `item_count` items.
    pub fn resolve_anchor(&self, item_count: usize) -> WindowAnchor {
        if item_count == 0 {
            return WindowAnchor::Empty;
        }
        let current = self.visible_item_index;
        let corrected = self.update_scroll_position_if_first_item_was_deleted(item_count, current);
        if corrected == current {
            WindowAnchor::Valid(current)
        } else {
            cdebug!(
                index = current,
                item_count,
                clamped = corrected,
                "visible index past the end, clamping"
            );
            WindowAnchor::Clamped(corrected)
        }
    }

    /// Commits the outcome of a layout pass.
    ///
    /// This is the only place the item count is refreshed. The visible index becomes the index
    /// of the front card, or 0 when the pass had nothing to show.
    pub fn apply_measure_result<K, P>(&mut self, result: &MeasureResult<'_, K, P>) {
        self.last_known_item_count = result.item_count;
        self.has_current_item = result.current_item.is_some();
        self.visible_item_index = result.current_item.map_or(0, |item| item.index);
        self.remeasure_requested = false;
        self.passes = self.passes.wrapping_add(1);
    }

    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            visible_item_index: self.visible_item_index,
        }
    }

    /// Restores a previously captured position and asks for a new layout pass.
    pub fn restore(&mut self, snapshot: StackSnapshot) {
        self.snap_to(snapshot.visible_item_index);
    }
}
