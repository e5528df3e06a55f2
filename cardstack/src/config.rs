use crate::StackPosition;

/// Configuration for [`crate::MeasurePolicy`].
///
/// This is a plain value: build it once per stack (or whenever the host passes new arguments)
/// and hand it to the policy. `visible_cards` is always at least 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackConfig {
    /// How many cards are materialized and drawn, the front card included.
    pub visible_cards: usize,
    /// Uniform scale applied to every card behind the front one.
    pub scale_factor: f32,
    /// Fraction of the card size each successive back card is shifted by.
    pub offset_factor: f32,
    pub stack_position: StackPosition,
}

impl StackConfig {
    pub fn new(
        visible_cards: usize,
        scale_factor: f32,
        offset_factor: f32,
        stack_position: StackPosition,
    ) -> Self {
        Self {
            visible_cards: visible_cards.max(1),
            scale_factor,
            offset_factor,
            stack_position,
        }
    }

    pub fn with_visible_cards(mut self, visible_cards: usize) -> Self {
        self.visible_cards = visible_cards.max(1);
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_offset_factor(mut self, offset_factor: f32) -> Self {
        self.offset_factor = offset_factor;
        self
    }

    pub fn with_stack_position(mut self, stack_position: StackPosition) -> Self {
        self.stack_position = stack_position;
        self
    }

    /// `visible_cards`, normalized in case the field was written directly.
    pub fn visible_cards(&self) -> usize {
        self.visible_cards.max(1)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new(3, 0.95, 0.03, StackPosition::Bottom)
    }
}
