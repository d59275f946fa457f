use thiserror::Error;

use crate::model::{ProgressError, RoiError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Roi(#[from] RoiError),
}
