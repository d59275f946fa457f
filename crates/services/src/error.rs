//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Errors emitted while bootstrapping app services.
///
/// Runtime operations never fail: consent and progress calls degrade to a
/// logged no-op instead of surfacing errors to the page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
