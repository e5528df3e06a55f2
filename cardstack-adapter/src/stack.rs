use std::sync::Arc;

use cardstack::{
    Constraints, ItemProvider, MeasurePolicy, MeasuredItem, Placeable, Placement, StackConfig,
};
use tokio::runtime::Handle;

use crate::bridge::{CallbackTiming, NavigationPolicy, OnSwipedItem, SwipeBridge};
use crate::error::Result;
use crate::gesture::{
    Orientation, SwipeDirection, SwipeDirections, SwipeThresholds, ThresholdConfig,
};
use crate::handle::{PassInfo, StackHandle};
use crate::scope::NavigationScope;

/// Everything a host can configure on a [`CardStack`].
#[derive(Clone, Default)]
pub struct CardStackOptions {
    pub config: StackConfig,
    /// Swipe directions the recognizer should listen for. Defaults to left and right.
    pub directions: SwipeDirections,
    pub navigation: NavigationPolicy,
    pub timing: CallbackTiming,
    pub thresholds: SwipeThresholds,
    pub on_swiped_item: Option<OnSwipedItem>,
}

impl CardStackOptions {
    pub fn new(config: StackConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: StackConfig) -> Self {
        self.config = config;
        self
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

    pub fn with_swipe_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_on_swiped_item(
        mut self,
        on_swiped_item: Option<impl Fn(usize, SwipeDirection) + Send + Sync + 'static>,
    ) -> Self {
        self.on_swiped_item = on_swiped_item.map(|f| Arc::new(f) as _);
        self
    }

    /// Configures thresholds the old way, one threshold per drag orientation.
    ///
    /// Navigation is unchanged; the thresholds are only forwarded to the gesture recognizer.
    #[deprecated(note = "build a `SwipeThresholds` and use `with_swipe_thresholds` instead")]
    pub fn with_thresholds(
        self,
        threshold: impl Fn(Orientation) -> ThresholdConfig,
        velocity_threshold: f32,
    ) -> Self {
        self.with_swipe_thresholds(SwipeThresholds::from_fn(threshold, velocity_threshold))
    }
}

impl core::fmt::Debug for CardStackOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CardStackOptions")
            .field("config", &self.config)
            .field("directions", &self.directions)
            .field("navigation", &self.navigation)
            .field("timing", &self.timing)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

/// A swipeable card stack: layout policy, shared state, task scope and gesture bridge wired
/// together.
///
/// The host calls [`Self::layout`] once per frame, forwards recognizer events to
/// [`Self::gesture_observer`], and may keep [`Self::state`] around for programmatic navigation.
/// Dropping the stack cancels pending navigation and fails outstanding `snap_to` calls with
/// [`crate::StackError::Disposed`].
#[derive(Debug)]
pub struct CardStack<K, P> {
    policy: MeasurePolicy<K, P>,
    handle: StackHandle,
    scope: Arc<NavigationScope>,
    bridge: SwipeBridge,
    thresholds: SwipeThresholds,
}

impl<K, P: Placeable> CardStack<K, P> {
    /// Creates a stack with fresh state on the current tokio runtime.
    pub fn new(options: CardStackOptions) -> Result<Self> {
        Self::with_state(options, StackHandle::new())
    }

    /// Creates a stack around an existing state handle on the current tokio runtime.
    pub fn with_state(options: CardStackOptions, handle: StackHandle) -> Result<Self> {
        Ok(Self::with_runtime(options, handle, Handle::try_current()?))
    }

    pub fn with_runtime(options: CardStackOptions, handle: StackHandle, runtime: Handle) -> Self {
        let scope = Arc::new(NavigationScope::new(runtime));
        let bridge = SwipeBridge::new(handle.clone(), Arc::clone(&scope))
            .with_directions(options.directions)
            .with_navigation(options.navigation)
            .with_timing(options.timing)
            .with_on_swiped_item(options.on_swiped_item);
        Self {
            policy: MeasurePolicy::new(options.config),
            handle,
            scope,
            bridge,
            thresholds: options.thresholds,
        }
    }

    /// Legacy constructor taking discrete thresholds.
    ///
    /// Listens for left and right swipes only, with default navigation.
    #[deprecated(note = "use `CardStack::new` with `CardStackOptions`")]
    pub fn with_thresholds(
        threshold: impl Fn(Orientation) -> ThresholdConfig,
        velocity_threshold: f32,
        on_swiped_item: Option<impl Fn(usize, SwipeDirection) + Send + Sync + 'static>,
    ) -> Result<Self> {
        let options = CardStackOptions::default()
            .with_directions(SwipeDirections::HORIZONTAL)
            .with_swipe_thresholds(SwipeThresholds::from_fn(threshold, velocity_threshold))
            .with_on_swiped_item(on_swiped_item);
        Self::new(options)
    }

    pub fn state(&self) -> &StackHandle {
        &self.handle
    }

    pub fn config(&self) -> &StackConfig {
        self.policy.config()
    }

    pub fn set_config(&mut self, config: StackConfig) {
        self.policy.set_config(config);
    }

    pub fn directions(&self) -> SwipeDirections {
        self.bridge.directions()
    }

    pub fn swipe_thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    /// The observer a gesture recognizer reports drags and committed swipes to.
    pub fn gesture_observer(&self) -> &SwipeBridge {
        &self.bridge
    }

    pub fn scope(&self) -> &NavigationScope {
        &self.scope
    }

    /// Runs one layout pass. See [`StackHandle::layout`].
    pub fn layout<I>(
        &mut self,
        provider: &mut I,
        constraints: Constraints,
        place: impl FnMut(&MeasuredItem<K, P>, &P, Placement),
    ) -> PassInfo
    where
        I: ItemProvider<Key = K, Content = P> + ?Sized,
    {
        self.handle
            .layout(&mut self.policy, provider, constraints, place)
    }

    /// Cancels pending navigation and fails outstanding awaiters.
    pub fn dispose(&self) {
        self.scope.cancel();
        self.handle.dispose();
    }
}

impl<K, P> Drop for CardStack<K, P> {
    fn drop(&mut self) {
        self.scope.cancel();
        self.handle.dispose();
    }
}
