use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use kita_core::model::{ProgressSession, SessionEnd, StageAdvance, Stages};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::hooks::{ToastSeverity, Toaster};
use crate::timer::DeadlineTimer;

/// Deadline used when a caller does not pass one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown through the toaster when a session times out without an `on_timeout`.
pub const TIMEOUT_NOTICE: &str = "This is taking longer than expected. Please try again.";

pub type ProgressCallback = Box<dyn FnOnce() + Send + 'static>;

/// Per-session settings for `ProgressIndicator::start`.
#[derive(Default)]
pub struct ProgressOptions {
    timeout: Option<Duration>,
    on_timeout: Option<ProgressCallback>,
    on_complete: Option<ProgressCallback>,
}

impl ProgressOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn on_timeout(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_timeout = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ProgressOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressOptions")
            .field("timeout", &self.timeout)
            .field("on_timeout", &self.on_timeout.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// What the loading overlay should render right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub visible: bool,
    pub message: String,
    pub percent: u8,
    pub stage_index: usize,
    pub stage_count: usize,
}

impl ProgressSnapshot {
    fn of(session: &ProgressSession) -> Self {
        Self {
            visible: true,
            message: session.message().to_string(),
            percent: session.percent(),
            stage_index: session.stage_index(),
            stage_count: session.stage_count(),
        }
    }

    /// Current stage label, or `None` while hidden.
    #[must_use]
    pub fn stage_label(&self) -> Option<String> {
        self.visible.then(|| {
            format!("Step {} of {}", self.stage_index + 1, self.stage_count)
        })
    }
}

struct Running {
    session: ProgressSession,
    generation: u64,
    on_timeout: Option<ProgressCallback>,
    on_complete: Option<ProgressCallback>,
}

struct State {
    running: Option<Running>,
    generation: u64,
    timer: DeadlineTimer,
}

struct Shared {
    state: Mutex<State>,
    snapshot: watch::Sender<ProgressSnapshot>,
    toaster: Option<Arc<dyn Toaster>>,
    default_timeout: Duration,
}

/// The page's single busy indicator.
///
/// Cloning yields another handle to the same indicator; all call sites share
/// one session and the most recent `start` wins. A superseded session's
/// deadline is aborted, so its callbacks never fire.
#[derive(Clone)]
pub struct ProgressIndicator {
    shared: Arc<Shared>,
}

impl ProgressIndicator {
    #[must_use]
    pub fn new(
        runtime: Handle,
        toaster: Option<Arc<dyn Toaster>>,
        default_timeout: Duration,
    ) -> Self {
        let (snapshot, _) = watch::channel(ProgressSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    running: None,
                    generation: 0,
                    timer: DeadlineTimer::new(runtime),
                }),
                snapshot,
                toaster,
                default_timeout,
            }),
        }
    }

    /// Begin a new session at stage 0, replacing any active one.
    pub fn start(&self, stages: impl Into<Stages>, options: ProgressOptions) {
        let session = ProgressSession::start(stages.into());
        let timeout = options.timeout.unwrap_or(self.shared.default_timeout);

        let mut state = self.lock();
        state.timer.cancel();
        if state.running.take().is_some() {
            debug!("replacing active progress session");
        }
        state.generation += 1;
        let generation = state.generation;

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        state.timer.arm(timeout, move || {
            if let Some(shared) = weak.upgrade() {
                ProgressIndicator { shared }.expire(generation);
            }
        });

        debug!(
            stages = session.stage_count(),
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "progress session started"
        );
        self.publish(ProgressSnapshot::of(&session));
        state.running = Some(Running {
            session,
            generation,
            on_timeout: options.on_timeout,
            on_complete: options.on_complete,
        });
    }

    /// Advance to the next stage; passing the last stage completes the session.
    pub fn next_stage(&self) {
        let mut state = self.lock();
        let Some(running) = state.running.as_mut() else {
            warn!("next_stage called without an active progress session");
            return;
        };

        match running.session.advance() {
            StageAdvance::Advanced(index) => {
                debug!(stage = index, "progress stage advanced");
                let snapshot = ProgressSnapshot::of(&running.session);
                self.publish(snapshot);
            }
            StageAdvance::Exhausted => {
                drop(state);
                self.finish(SessionEnd::Completed);
            }
        }
    }

    /// Finish the session and run its `on_complete` callback. No-op when idle.
    pub fn complete(&self) {
        self.finish(SessionEnd::Completed);
    }

    /// Finish the session without running any callback. No-op when idle.
    pub fn cancel(&self) {
        self.finish(SessionEnd::Cancelled);
    }

    /// Replace the displayed label without changing stage or progress.
    pub fn update_message(&self, message: impl Into<String>) {
        let mut state = self.lock();
        let Some(running) = state.running.as_mut() else {
            debug!("update_message ignored; no active progress session");
            return;
        };
        running.session.set_message(message);
        let snapshot = ProgressSnapshot::of(&running.session);
        self.publish(snapshot);
    }

    /// Single-stage shorthand for `start`.
    pub fn show_loading(&self, message: impl Into<String>, timeout: Option<Duration>) {
        let mut options = ProgressOptions::new();
        options.timeout = timeout;
        self.start(Stages::single(message), options);
    }

    /// Shorthand for `complete`.
    pub fn hide_loading(&self) {
        self.complete();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().running.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.shared.snapshot.subscribe()
    }

    fn finish(&self, end: SessionEnd) -> bool {
        let running = {
            let mut state = self.lock();
            let Some(running) = state.running.take() else {
                return false;
            };
            state.timer.cancel();
            self.publish(ProgressSnapshot::default());
            running
        };

        debug!(?end, "progress session finished");
        if end == SessionEnd::Completed {
            if let Some(on_complete) = running.on_complete {
                on_complete();
            }
        }
        true
    }

    fn expire(&self, generation: u64) {
        let running = {
            let mut state = self.lock();
            let is_current = state
                .running
                .as_ref()
                .is_some_and(|running| running.generation == generation);
            if !is_current {
                return;
            }
            self.publish(ProgressSnapshot::default());
            state.running.take()
        };
        let Some(running) = running else {
            return;
        };

        warn!(
            label = running.session.message(),
            end = ?SessionEnd::TimedOut,
            "progress session timed out"
        );
        if let Some(on_timeout) = running.on_timeout {
            on_timeout();
        } else if let Some(toaster) = &self.shared.toaster {
            toaster.show(TIMEOUT_NOTICE, ToastSeverity::Warning);
        } else {
            debug!("no toaster installed; timeout notice dropped");
        }
    }

    fn publish(&self, snapshot: ProgressSnapshot) {
        self.shared.snapshot.send_replace(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ProgressIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressIndicator")
            .field("snapshot", &*self.shared.snapshot.borrow())
            .finish_non_exhaustive()
    }
}
