//! Optional collaborators supplied by the host page.
//!
//! Each hook is injected at construction time. A missing hook is never an
//! error; callers log at debug level and carry on.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use kita_core::model::ConsentModeUpdate;

/// Analytics vendor integration (treated as opaque).
pub trait AnalyticsHook: Send + Sync {
    /// Apply a consent-mode update to the analytics-storage permission flag.
    fn update_consent(&self, update: ConsentModeUpdate);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastSeverity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ToastSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-visible notification sink.
pub trait Toaster: Send + Sync {
    fn show(&self, message: &str, severity: ToastSeverity);
}

/// Exception sink for failures that were caught and degraded.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &(dyn StdError + 'static));
}

/// The set of optional collaborators handed to services and ui.
#[derive(Clone, Default)]
pub struct Hooks {
    pub analytics: Option<Arc<dyn AnalyticsHook>>,
    pub toaster: Option<Arc<dyn Toaster>>,
    pub errors: Option<Arc<dyn ErrorReporter>>,
}

impl Hooks {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_analytics(mut self, hook: Arc<dyn AnalyticsHook>) -> Self {
        self.analytics = Some(hook);
        self
    }

    #[must_use]
    pub fn with_toaster(mut self, toaster: Arc<dyn Toaster>) -> Self {
        self.toaster = Some(toaster);
        self
    }

    #[must_use]
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.errors = Some(reporter);
        self
    }

    /// Forward a caught error to the reporter, if one was provided.
    pub fn report_error(&self, error: &(dyn StdError + 'static)) {
        match &self.errors {
            Some(reporter) => reporter.report(error),
            None => tracing::debug!(%error, "no error reporter installed"),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("analytics", &self.analytics.is_some())
            .field("toaster", &self.toaster.is_some())
            .field("errors", &self.errors.is_some())
            .finish()
    }
}
