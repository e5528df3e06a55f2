use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinSet;

use crate::error::Result;

/// A cooperative task scope tied to the lifetime of one stack.
///
/// Navigation requests are launched here instead of being run inline with gesture dispatch.
/// Dropping the scope (or calling [`Self::cancel`]) aborts every task that has not finished.
#[derive(Debug)]
pub struct NavigationScope {
    runtime: Handle,
    tasks: Mutex<JoinSet<()>>,
}

impl NavigationScope {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Creates a scope on the runtime the caller is running in.
    pub fn current() -> Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }

    fn tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn launch<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks();
        // Reap finished tasks so the set does not grow with every swipe.
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(task, &self.runtime);
    }

    /// Number of launched tasks that have not been reaped yet.
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks();
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }

    pub fn cancel(&self) {
        let mut tasks = self.tasks();
        if !tasks.is_empty() {
            adebug!(pending = tasks.len(), "cancelling navigation tasks");
        }
        tasks.abort_all();
    }
}

impl Drop for NavigationScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
