use std::sync::Arc;

use cardstack::Offset;

use crate::gesture::{DragObserver, SwipeDirection, SwipeDirections};
use crate::handle::StackHandle;
use crate::scope::NavigationScope;

/// Callback invoked with `(swiped_index, direction)` for every handled swipe.
pub type OnSwipedItem = Arc<dyn Fn(usize, SwipeDirection) + Send + Sync>;

/// How a committed swipe maps to navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationPolicy {
    /// Right goes back one card; left, up and down go forward.
    #[default]
    Bidirectional,
    /// Every direction goes forward.
    AdvanceOnly,
}

impl NavigationPolicy {
    pub fn advances(self, direction: SwipeDirection) -> bool {
        match self {
            Self::Bidirectional => direction != SwipeDirection::Right,
            Self::AdvanceOnly => true,
        }
    }
}

/// When the swipe callback fires relative to navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackTiming {
    /// Right after the navigation task is launched.
    #[default]
    Immediate,
    /// Once the layout pass showing the new card has run.
    AfterCommit,
}

/// Turns committed swipes into navigation.
///
/// Each swipe launches exactly one `advance` or `retreat` on the stack's [`NavigationScope`] and
/// then reports `(swiped_index, direction)`, where `swiped_index` is the card that was in front
/// when the swipe landed. Swipes in directions outside `directions`, and swipes while the last
/// layout pass saw no items, are dropped without a callback.
#[derive(Clone)]
pub struct SwipeBridge {
    handle: StackHandle,
    scope: Arc<NavigationScope>,
    directions: SwipeDirections,
    navigation: NavigationPolicy,
    timing: CallbackTiming,
    on_swiped_item: Option<OnSwipedItem>,
}

impl SwipeBridge {
    pub fn new(handle: StackHandle, scope: Arc<NavigationScope>) -> Self {
        Self {
            handle,
            scope,
            directions: SwipeDirections::default(),
            navigation: NavigationPolicy::default(),
            timing: CallbackTiming::default(),
            on_swiped_item: None,
        }
    }

    pub fn with_directions(mut self, directions: SwipeDirections) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationPolicy) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_timing(mut self, timing: CallbackTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_on_swiped_item(mut self, on_swiped_item: Option<OnSwipedItem>) -> Self {
        self.on_swiped_item = on_swiped_item;
        self
    }

    pub fn directions(&self) -> SwipeDirections {
        self.directions
    }

    /// Handles a committed swipe. Returns `true` when navigation was launched.
    pub fn swipe(&self, direction: SwipeDirection) -> bool {
        if !self.directions.contains(direction) {
            adebug!(?direction, "swipe in a disabled direction ignored");
            return false;
        }
        let (index, item_count) = self.handle.read(|s| {
            (s.visible_item_index(), s.last_known_item_count())
        });
        if item_count == 0 {
            adebug!(?direction, "swipe on an empty stack ignored");
            return false;
        }
        // A navigation may have written past the end before the next pass clamped it.
        let swiped_index = index.min(item_count - 1);

        self.handle.reset_drag();
        let handle = self.handle.clone();
        let advance = self.navigation.advances(direction);
        atrace!(swiped_index, ?direction, advance, "swipe committed");

        match self.timing {
            CallbackTiming::Immediate => {
                self.scope.launch(async move {
                    let _ = navigate(&handle, advance, swiped_index).await;
                });
                if let Some(cb) = &self.on_swiped_item {
                    cb(swiped_index, direction);
                }
            }
            CallbackTiming::AfterCommit => {
                let on_swiped_item = self.on_swiped_item.clone();
                self.scope.launch(async move {
                    match navigate(&handle, advance, swiped_index).await {
                        Ok(_) => {
                            if let Some(cb) = on_swiped_item {
                                cb(swiped_index, direction);
                            }
                        }
                        Err(_err) => {
                            adebug!(error = %_err, "swipe navigation did not complete");
                        }
                    }
                });
            }
        }
        true
    }
}

async fn navigate(
    handle: &StackHandle,
    advance: bool,
    current_index: usize,
) -> crate::error::Result<usize> {
    if advance {
        handle.advance(current_index).await
    } else {
        handle.retreat(current_index).await
    }
}

impl DragObserver for SwipeBridge {
    fn on_drag(&self, offset: Offset, rotation: f32) {
        self.handle.set_drag(offset, rotation);
    }

    fn on_drag_cancelled(&self) {
        self.handle.reset_drag();
    }

    fn on_swiped(&self, direction: SwipeDirection) {
        self.swipe(direction);
    }
}

impl core::fmt::Debug for SwipeBridge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwipeBridge")
            .field("directions", &self.directions)
            .field("navigation", &self.navigation)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
