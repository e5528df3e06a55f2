//! A headless layout engine for swipeable card stacks.
//!
//! For awaitable navigation, the gesture bridge and the composition surface, see the
//! `cardstack-adapter` crate.
//!
//! A card stack draws a handful of overlapping cards: the front card follows the user's drag,
//! and the cards behind it are shifted, scaled and pushed down in z order. Only the cards that
//! are actually visible are measured.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the container constraints of each layout pass
//! - an [`ItemProvider`] that counts, keys and measures items
//! - drag offset and rotation updates while the front card is being dragged
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod item;
mod policy;
mod provider;
mod result;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use config::StackConfig;
pub use item::{FRONT_Z_INDEX, MeasuredItem, stacked_offset};
pub use policy::{MeasurePolicy, StackLayout, visible_window};
pub use provider::{ItemProvider, Placeable};
pub use result::MeasureResult;
pub use state::{StackSnapshot, StackState, WindowAnchor};
pub use types::{Constraints, IntOffset, LayerTransform, Offset, Placement, StackPosition};
