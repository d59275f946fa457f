use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::hooks::{ToastSeverity, Toaster};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: ToastSeverity,
}

/// In-app toast queue rendered by the ui's toast host.
pub struct ToastCenter {
    runtime: Handle,
    lifetime: Duration,
    next_id: AtomicU64,
    toasts: Arc<watch::Sender<Vec<Toast>>>,
}

impl ToastCenter {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self::with_lifetime(runtime, TOAST_LIFETIME)
    }

    #[must_use]
    pub fn with_lifetime(runtime: Handle, lifetime: Duration) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            runtime,
            lifetime,
            next_id: AtomicU64::new(1),
            toasts: Arc::new(toasts),
        }
    }

    /// Toasts currently on screen, oldest first.
    #[must_use]
    pub fn current(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }

    /// Remove a toast early. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        dismiss_from(&self.toasts, id)
    }
}

impl Toaster for ToastCenter {
    fn show(&self, message: &str, severity: ToastSeverity) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, %severity, text = message, "toast shown");
        self.toasts.send_modify(|toasts| {
            toasts.push(Toast {
                id,
                message: message.to_string(),
                severity,
            });
        });

        let toasts: Weak<watch::Sender<Vec<Toast>>> = Arc::downgrade(&self.toasts);
        let lifetime = self.lifetime;
        self.runtime.spawn(async move {
            tokio::time::sleep(lifetime).await;
            if let Some(toasts) = toasts.upgrade() {
                dismiss_from(&toasts, id);
            }
        });
    }
}

fn dismiss_from(toasts: &watch::Sender<Vec<Toast>>, id: u64) -> bool {
    toasts.send_if_modified(|toasts| {
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    })
}
