use std::sync::Arc;

use services::{ConsentGate, Hooks, ProgressIndicator, SiteConfig, ToastCenter};

pub trait UiApp: Send + Sync {
    fn config(&self) -> SiteConfig;
    fn hooks(&self) -> Hooks;

    fn consent(&self) -> Arc<ConsentGate>;
    fn progress(&self) -> ProgressIndicator;
    fn toasts(&self) -> Arc<ToastCenter>;
}

#[derive(Clone)]
pub struct AppContext {
    config: SiteConfig,
    hooks: Hooks,

    consent: Arc<ConsentGate>,
    progress: ProgressIndicator,
    toasts: Arc<ToastCenter>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: app.config(),
            hooks: app.hooks(),
            consent: app.consent(),
            progress: app.progress(),
            toasts: app.toasts(),
        }
    }

    #[must_use]
    pub fn config(&self) -> SiteConfig {
        self.config
    }

    #[must_use]
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    #[must_use]
    pub fn consent(&self) -> Arc<ConsentGate> {
        Arc::clone(&self.consent)
    }

    /// Handle to the page's single loading indicator.
    #[must_use]
    pub fn progress(&self) -> ProgressIndicator {
        self.progress.clone()
    }

    #[must_use]
    pub fn toasts(&self) -> Arc<ToastCenter> {
        Arc::clone(&self.toasts)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
