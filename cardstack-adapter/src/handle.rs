use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cardstack::{
    Constraints, ItemProvider, MeasurePolicy, MeasuredItem, Offset, Placeable, Placement,
    StackSnapshot, StackState,
};
use tokio::sync::watch;

use crate::error::{Result, StackError};

/// Summary of the most recent layout pass, broadcast to navigation awaiters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassInfo {
    /// Number of passes completed so far; 0 before the first one.
    pub generation: u64,
    pub visible_item_index: usize,
    pub item_count: usize,
    /// Set once the owning stack has been torn down.
    pub disposed: bool,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<StackState>,
    passes: watch::Sender<PassInfo>,
}

/// A shared, cloneable handle to a [`StackState`].
///
/// The host keeps one to drive navigation imperatively (skip buttons and the like), the gesture
/// bridge holds another, and the layout pass goes through it every frame. All writes are
/// serialized by an internal mutex, each one a single field update.
///
/// Navigation methods are `async`: they write the new index right away and resolve once a layout
/// pass has reflected it, returning the index that pass actually committed.
#[derive(Clone, Debug)]
pub struct StackHandle {
    shared: Arc<Shared>,
}

impl Default for StackHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StackHandle {
    pub fn new() -> Self {
        Self::from_state(StackState::new())
    }

    pub fn from_state(state: StackState) -> Self {
        let info = PassInfo {
            visible_item_index: state.visible_item_index(),
            item_count: state.last_known_item_count(),
            ..PassInfo::default()
        };
        let (passes, _) = watch::channel(info);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                passes,
            }),
        }
    }

    pub fn from_snapshot(snapshot: StackSnapshot) -> Self {
        Self::from_state(StackState::with_initial_index(snapshot.visible_item_index))
    }

    fn lock(&self) -> MutexGuard<'_, StackState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&StackState) -> R) -> R {
        f(&self.lock())
    }

    pub fn visible_item_index(&self) -> usize {
        self.lock().visible_item_index()
    }

    pub fn last_known_item_count(&self) -> usize {
        self.lock().last_known_item_count()
    }

    pub fn snapshot(&self) -> StackSnapshot {
        self.lock().snapshot()
    }

    pub fn restore(&self, snapshot: StackSnapshot) {
        self.lock().restore(snapshot);
    }

    /// Fire-and-forget drag update from the gesture layer.
    pub fn set_drag(&self, offset: Offset, rotation: f32) {
        self.lock().set_drag(offset, rotation);
    }

    pub fn reset_drag(&self) {
        self.lock().reset_drag();
    }

    /// Returns and clears the pending layout request raised by navigation.
    pub fn take_remeasure_request(&self) -> bool {
        self.lock().take_remeasure_request()
    }

    pub fn pass_info(&self) -> PassInfo {
        *self.shared.passes.borrow()
    }

    /// Subscribes to layout pass completions.
    pub fn subscribe(&self) -> watch::Receiver<PassInfo> {
        self.shared.passes.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.passes.borrow().disposed
    }

    /// Jumps to `index` and waits for the layout pass that shows it.
    ///
    /// The index is clamped by that pass, so the returned value may be smaller than `index`.
    /// If another navigation lands before the pass runs, the later one wins and both awaiters see
    /// its result.
    pub async fn snap_to(&self, index: usize) -> Result<usize> {
        let (target, mut passes) = {
            let mut state = self.lock();
            let passes = self.shared.passes.subscribe();
            let current = *passes.borrow();
            if current.disposed {
                return Err(StackError::Disposed);
            }
            state.snap_to(index);
            (current.generation + 1, passes)
        };
        atrace!(index, target, "StackHandle::snap_to");

        let info = *passes
            .wait_for(|p| p.disposed || p.generation >= target)
            .await
            .map_err(|_| StackError::Disposed)?;
        if info.disposed {
            return Err(StackError::Disposed);
        }
        Ok(info.visible_item_index)
    }

    /// Moves to the card after `current_index`.
    pub async fn advance(&self, current_index: usize) -> Result<usize> {
        self.snap_to(StackState::advance_target(current_index)).await
    }

    /// Moves to the card before `current_index`, stopping at the first card.
    pub async fn retreat(&self, current_index: usize) -> Result<usize> {
        self.snap_to(StackState::retreat_target(current_index)).await
    }

    /// Runs a layout pass and wakes every navigation waiting on it.
    ///
    /// The provider is measured while the state lock is held, so `provider` must not call back
    /// into this handle (or any clone of it); doing so deadlocks. `place` receives each content
    /// piece with its placement once the lock is released, so it may read or drive the handle.
    pub fn layout<K, P, I>(
        &self,
        policy: &mut MeasurePolicy<K, P>,
        provider: &mut I,
        constraints: Constraints,
        place: impl FnMut(&MeasuredItem<K, P>, &P, Placement),
    ) -> PassInfo
    where
        P: Placeable,
        I: ItemProvider<Key = K, Content = P> + ?Sized,
    {
        let mut state = self.lock();
        let layout = policy.measure(&mut state, provider, constraints);
        let previous = *self.shared.passes.borrow();
        let info = PassInfo {
            generation: previous.generation + 1,
            visible_item_index: state.visible_item_index(),
            item_count: state.last_known_item_count(),
            disposed: previous.disposed,
        };
        self.shared.passes.send_replace(info);
        drop(state);

        layout.place(place);
        info
    }

    /// Marks the stack as torn down and fails every pending navigation with
    /// [`StackError::Disposed`].
    pub fn dispose(&self) {
        let _state = self.lock();
        self.shared.passes.send_modify(|p| p.disposed = true);
        adebug!("StackHandle::dispose");
    }
}
