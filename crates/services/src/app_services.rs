use std::sync::Arc;

use storage::repository::Storage;
use tokio::runtime::Handle;

use crate::config::SiteConfig;
use crate::consent_service::ConsentGate;
use crate::error::AppServicesError;
use crate::hooks::{Hooks, Toaster};
use crate::progress_service::ProgressIndicator;
use crate::toast_service::ToastCenter;

/// Assembles the page's services; owned by the application shell.
#[derive(Clone)]
pub struct AppServices {
    config: SiteConfig,
    hooks: Hooks,
    consent: Arc<ConsentGate>,
    progress: ProgressIndicator,
    toasts: Arc<ToastCenter>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: SiteConfig,
        hooks: Hooks,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, Handle::current(), config, hooks))
    }

    /// Build services over an existing storage aggregate.
    ///
    /// When `hooks` carries no toaster, the in-app `ToastCenter` becomes the
    /// loading indicator's timeout notifier.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        runtime: Handle,
        config: SiteConfig,
        mut hooks: Hooks,
    ) -> Self {
        let toasts = Arc::new(ToastCenter::new(runtime.clone()));
        if hooks.toaster.is_none() {
            let toaster: Arc<dyn Toaster> = toasts.clone();
            hooks.toaster = Some(toaster);
        }

        let consent = Arc::new(ConsentGate::new(
            Arc::clone(&storage.local),
            hooks.analytics.clone(),
        ));
        let progress =
            ProgressIndicator::new(runtime, hooks.toaster.clone(), config.loading_timeout);

        Self {
            config,
            hooks,
            consent,
            progress,
            toasts,
        }
    }

    #[must_use]
    pub fn config(&self) -> SiteConfig {
        self.config
    }

    #[must_use]
    pub fn hooks(&self) -> Hooks {
        self.hooks.clone()
    }

    #[must_use]
    pub fn consent(&self) -> Arc<ConsentGate> {
        Arc::clone(&self.consent)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressIndicator {
        self.progress.clone()
    }

    #[must_use]
    pub fn toasts(&self) -> Arc<ToastCenter> {
        Arc::clone(&self.toasts)
    }
}
