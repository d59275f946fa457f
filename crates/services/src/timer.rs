use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A single cancellable countdown owned by the component that armed it.
///
/// At most one callback is pending at a time: arming again replaces the
/// previous countdown, and cancelling aborts the pending task so its callback
/// can never run. Dropping the timer cancels it.
#[derive(Debug)]
pub struct DeadlineTimer {
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl DeadlineTimer {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: None,
        }
    }

    /// Schedule `on_expire` to run once `after` has elapsed.
    pub fn arm<F>(&mut self, after: Duration, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            on_expire();
        });
        self.pending = Some(task);
    }

    /// Abort the pending countdown. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                let was_live = !task.is_finished();
                task.abort();
                was_live
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
