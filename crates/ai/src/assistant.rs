use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::generator::TextGenerator;
use crate::prompt::{self, EmailKind};

pub const INSIGHT_FALLBACK: &str = "Unable to generate AI insights at this time. Please try again later.";
pub const DRAFT_FALLBACK: &str = "Error generating draft.";

const INSIGHT_SIMULATION: &str = "Simulation Mode: Gemini API Key not configured. Please add your API key to the environment variables to enable AI features. (Simulated response: Data looks healthy, occupancy is stable.)";

/// Front door for AI features.
///
/// Without a generator every call answers in simulation mode. Generator failures never
/// surface as errors: they are logged and replaced by a fixed fallback string.
#[derive(Clone, Default)]
pub struct Assistant {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Assistant {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn is_simulated(&self) -> bool {
        self.generator.is_none()
    }

    pub async fn insight<T: Serialize + Sync>(&self, context: &str, records: &[T]) -> String {
        let Some(generator) = &self.generator else {
            return INSIGHT_SIMULATION.to_string();
        };
        let prompt = match prompt::insight_prompt(context, records) {
            Ok(p) => p,
            Err(err) => {
                warn!(error = %err, "insight prompt could not be built");
                return INSIGHT_FALLBACK.to_string();
            }
        };
        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "No insight generated.".to_string(),
            Err(err) => {
                warn!(error = %err, context, "insight generation failed");
                INSIGHT_FALLBACK.to_string()
            }
        }
    }

    pub async fn guest_email(&self, guest_name: &str, kind: EmailKind) -> String {
        let Some(generator) = &self.generator else {
            return format!(
                "Simulation Mode: Dear {guest_name}, this is a simulated {kind} email because the API Key is missing."
            );
        };
        match generator.generate(&prompt::guest_email_prompt(guest_name, kind)).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "Could not draft email.".to_string(),
            Err(err) => {
                warn!(error = %err, %kind, "guest email draft failed");
                DRAFT_FALLBACK.to_string()
            }
        }
    }
}

impl core::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Assistant")
            .field("simulated", &self.is_simulated())
            .finish()
    }
}
