#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod consent_service;
pub mod error;
pub mod hooks;
pub mod progress_service;
pub mod timer;
pub mod toast_service;

pub use app_services::AppServices;
pub use config::{SiteConfig, SliderSettings};
pub use consent_service::ConsentGate;
pub use error::AppServicesError;
pub use hooks::{AnalyticsHook, ErrorReporter, Hooks, ToastSeverity, Toaster};
pub use progress_service::{
    DEFAULT_TIMEOUT, ProgressCallback, ProgressIndicator, ProgressOptions, ProgressSnapshot,
    TIMEOUT_NOTICE,
};
pub use timer::DeadlineTimer;
pub use toast_service::{TOAST_LIFETIME, Toast, ToastCenter};
