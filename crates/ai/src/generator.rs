use async_trait::async_trait;

use crate::error::AiError;

/// A remote (or fake) model that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
