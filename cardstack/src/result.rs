use crate::MeasuredItem;

/// What a layout pass ended up showing.
///
/// Produced once per pass and handed straight to [`crate::StackState::apply_measure_result`].
#[derive(Debug)]
pub struct MeasureResult<'a, K, P> {
    /// The front card, or `None` when the window was empty.
    pub current_item: Option<&'a MeasuredItem<K, P>>,
    pub item_count: usize,
}

impl<K, P> Clone for MeasureResult<'_, K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, P> Copy for MeasureResult<'_, K, P> {}
