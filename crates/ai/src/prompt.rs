use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Records included in an insight prompt.
pub const INSIGHT_SAMPLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailKind {
    CheckIn,
    ReviewRequest,
}

impl EmailKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailKind::CheckIn => "check-in",
            EmailKind::ReviewRequest => "review-request",
        }
    }
}

impl core::fmt::Display for EmailKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary prompt over the first [`INSIGHT_SAMPLE`] records.
pub fn insight_prompt<T: Serialize>(context: &str, records: &[T]) -> Result<String, AiError> {
    let sample = &records[..records.len().min(INSIGHT_SAMPLE)];
    let data = serde_json::to_string(sample).map_err(|e| AiError::InvalidInput(e.to_string()))?;
    Ok(format!(
        "You are an AI assistant for a Property Management CRM called Lodgex.\n\
         Analyze the following JSON data regarding {context}.\n\
         Provide a concise, professional summary (max 2 sentences) and one actionable recommendation.\n\
         \n\
         Data:\n\
         {data}"
    ))
}

pub fn guest_email_prompt(guest_name: &str, kind: EmailKind) -> String {
    format!(
        "Draft a polite, professional, and warm {kind} email for a guest named {guest_name}.\n\
         Keep it under 100 words. Do not include subject line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_prompt_samples_first_five_records() {
        let records: Vec<u32> = (1..=8).collect();
        let prompt = insight_prompt("recent bookings", &records).unwrap();

        assert!(prompt.contains("regarding recent bookings"));
        assert!(prompt.contains("[1,2,3,4,5]"));
        assert!(!prompt.contains(",6"));
    }

    #[test]
    fn email_kind_uses_kebab_case() {
        let kind: EmailKind = serde_json::from_str("\"review-request\"").unwrap();
        assert_eq!(kind, EmailKind::ReviewRequest);
        assert!(guest_email_prompt("Alice Johnson", EmailKind::CheckIn).contains("warm check-in email"));
    }
}
