use alloc::vec::Vec;

use crate::Constraints;

/// One measured, placement-ready piece of an item's content.
pub trait Placeable {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Whether this piece follows the front card's drag offset and rotation.
    ///
    /// Content that returns `false` stays put while the card is being dragged.
    fn is_drag_enabled(&self) -> bool {
        true
    }
}

/// Supplies the items of a stack.
///
/// The provider is the authority on how many items exist; the layout pass asks for the count
/// every time and never caches it across passes.
pub trait ItemProvider {
    type Key;
    type Content: Placeable;

    fn item_count(&self) -> usize;

    /// A stable identity for the item at `index`.
    fn key(&self, index: usize) -> Self::Key;

    /// Measures the item at `index`, producing zero or more content pieces.
    ///
    /// Called in the middle of a layout pass that holds the stack state mutably; an
    /// implementation must not reach back into the state that is being laid out.
    fn measure(&mut self, index: usize, constraints: Constraints) -> Vec<Self::Content>;
}
