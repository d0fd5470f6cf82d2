// Error types
//
// Domain errors for validation, generation and rendering, plus helpers that
// turn startup problems into actionable messages.

use thiserror::Error;

/// A submitted form failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    Missing { field: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Form key the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field } | ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// The content generator could not produce content
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Content generation is not configured: {0}")]
    NotConfigured(String),

    #[error("Content generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Content generator returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to reach content generator: {0}")]
    Transport(String),

    #[error("Content generator returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// A page could not be rendered
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to register template '{name}': {message}")]
    Template { name: String, message: String },

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Failed to read template override {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Startup warning shown when no API key is configured
pub fn api_key_missing_warning() -> String {
    "OPENAI_API_KEY not set; using the offline generator with canned suggestions.\n\n\
    To enable AI-generated content, either:\n\
    • export OPENAI_API_KEY=\"sk-...\"\n\
    • add OPENAI_API_KEY=sk-... to a .env file (keep it out of version control)\n\
    • set [generator] api_key in ~/.parenting-assistant/config.toml"
        .to_string()
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        Error: {}\n\n\
        Common mistakes:\n\
        • Missing quotes around strings\n\
        • Port outside 0-65535\n\
        • Unknown provider (expected \"openai\" or \"offline\")",
        path, error
    )
}
