// Generator factory
//
// Creates the content generator selected by configuration

use std::sync::Arc;

use super::{ContentGenerator, OfflineGenerator, OpenAIGenerator};
use crate::config::{GeneratorConfig, ProviderKind};
use crate::errors::{api_key_missing_warning, GenerationError};

/// Create a generator based on the generator configuration
///
/// The OpenAI provider without an API key degrades to the offline generator
/// instead of failing startup.
pub fn create_generator(config: &GeneratorConfig) -> Result<Arc<dyn ContentGenerator>, GenerationError> {
    match config.provider {
        ProviderKind::Offline => Ok(Arc::new(OfflineGenerator::new())),
        ProviderKind::OpenAI => match OpenAIGenerator::from_config(config) {
            Ok(generator) => {
                tracing::info!(model = %generator.model(), "Using OpenAI generator");
                Ok(Arc::new(generator))
            }
            Err(GenerationError::NotConfigured(_))
                if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) =>
            {
                tracing::warn!("{}", api_key_missing_warning());
                Ok(Arc::new(OfflineGenerator::new()))
            }
            Err(e) => Err(e),
        },
    }
}
