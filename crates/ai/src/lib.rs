//! `lodgex-ai`
//!
//! **Responsibility:** Optional text-generation boundary.
//!
//! This crate does not touch CRM state:
//! - It builds prompts from records handed to it.
//! - It calls a [`TextGenerator`] when one is configured.
//! - It returns display text, falling back to fixed strings on failure.

pub mod assistant;
pub mod error;
pub mod generator;
pub mod prompt;

pub use assistant::{Assistant, DRAFT_FALLBACK, INSIGHT_FALLBACK};
pub use error::AiError;
pub use generator::TextGenerator;
pub use prompt::EmailKind;
