use thiserror::Error;

use lodgex_core::DomainError;
use lodgex_integrations::FeedError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Working-set store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} table lock poisoned")]
    Poisoned(&'static str),

    /// A guarded write was refused by its check (e.g. overlapping dates).
    #[error(transparent)]
    Rejected(#[from] DomainError),
}

/// Remote mirror failure. Never fatal to the local write.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("database error in {operation}: {message}")]
    Database { operation: &'static str, message: String },

    #[error("remote conflict: {0}")]
    Conflict(String),

    #[error("remote record could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(DomainError),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        ServiceError::Domain(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(domain) => ServiceError::Domain(domain),
            other => ServiceError::Store(other),
        }
    }
}
