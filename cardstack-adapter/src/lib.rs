//! Adapter utilities for the `cardstack` crate.
//!
//! The `cardstack` crate is UI-agnostic and synchronous: it lays out a stack and keeps its
//! navigation bookkeeping. This crate adds the pieces a host widget needs around it:
//!
//! - Awaitable navigation on a shared state handle ([`StackHandle`])
//! - A task scope tied to the widget lifetime ([`NavigationScope`])
//! - A bridge from committed swipes to navigation ([`SwipeBridge`])
//! - The composition surface that wires them together ([`CardStack`])
//!
//! Navigation runs on tokio. Gesture recognition stays outside: any recognizer can drive a stack
//! through [`DragObserver`].
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bridge;
mod error;
mod gesture;
mod handle;
mod scope;
mod stack;


pub use bridge::{CallbackTiming, NavigationPolicy, OnSwipedItem, SwipeBridge};
pub use error::{Result, StackError};
pub use gesture::{
    DragObserver, Orientation, SwipeDirection, SwipeDirections, SwipeThresholds, ThresholdConfig,
};
pub use handle::{PassInfo, StackHandle};
pub use scope::NavigationScope;
pub use stack::{CardStack, CardStackOptions};
