//! Infrastructure layer: working-set store, remote mirror, service, config, external clients.

pub mod config;
pub mod error;
pub mod gemini;
pub mod remote;
pub mod seed;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{RemoteError, ServiceError, ServiceResult, StoreError};
pub use service::{Availability, CrmService, DashboardSummary, ImportBatch, ImportSummary, InsightSubject};
pub use store::{InMemoryStore, RecordStore};
