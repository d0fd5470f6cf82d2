// Emotion check-in replies
//
// The emotions prompt asks the model for a JSON object. Models sometimes wrap
// it in prose or code fences, so the first {...} span is tried as well.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("Failed to compile JSON object regex"));

/// Supportive reply for an emotion check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionSupport {
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub affirmation: String,
}

impl EmotionSupport {
    /// Parse a model reply, or None if it holds no usable support object
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        serde_json::from_str::<Self>(trimmed)
            .ok()
            .or_else(|| {
                JSON_OBJECT
                    .find(trimmed)
                    .and_then(|m| serde_json::from_str::<Self>(m.as_str()).ok())
            })
            .filter(|support| !support.message.trim().is_empty())
    }

    /// Safe default used when the model reply cannot be parsed
    pub fn fallback() -> Self {
        Self {
            message: "I hear you — it's okay to feel this way.".to_string(),
            suggestion: "Try a deep breath together, or a short quiet activity.".to_string(),
            affirmation: "You are safe and loved.".to_string(),
        }
    }

    /// Plain-text rendering shown on the result page
    pub fn to_text(&self) -> String {
        [&self.message, &self.suggestion, &self.affirmation]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
