// Content generation
//
// Form submissions are turned into personalized text by a ContentGenerator.
// The server only sees the trait, so handlers can be exercised with a fake
// while production uses the OpenAI-compatible client or the offline fallback.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::GenerationError;
use crate::forms::{Feature, FormSubmission};

pub mod factory;
pub mod offline;
pub mod openai;
pub mod prompts;
pub mod support;

pub use factory::create_generator;
pub use offline::OfflineGenerator;
pub use openai::OpenAIGenerator;
pub use support::EmotionSupport;

/// Text produced for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub feature: Feature,
    pub text: String,
}

impl GeneratedContent {
    pub fn new(feature: Feature, text: impl Into<String>) -> Self {
        Self {
            feature,
            text: text.into(),
        }
    }
}

/// Trait for content generators
///
/// Implementations must not retry; a failure is reported straight back to
/// the user.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce content for a validated submission
    async fn generate(&self, submission: &FormSubmission) -> Result<GeneratedContent, GenerationError>;

    /// Generator name for logs and the health endpoint
    fn name(&self) -> &str;
}
