mod constants;
pub(crate) mod gemini;

pub use gemini::{
    Candidate, Content, GeminiConfig, GenerateContentRequest, GenerateContentResponse,
    GenerationClient, Part,
};

use crate::core::GenerationError;

/// Where the generation API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read from the `GEMINI_API_KEY` environment variable
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(self) -> Result<String, GenerationError> {
        let key = match self {
            ApiKey::Default => {
                std::env::var(constants::gemini::API_KEY_ENV_VAR).map_err(|_| {
                    GenerationError::Configuration(format!(
                        "{} is not set",
                        constants::gemini::API_KEY_ENV_VAR
                    ))
                })?
            }
            ApiKey::Custom(key) => key,
        };

        if key.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "API key is empty".to_string(),
            ));
        }
        Ok(key)
    }

    pub fn default_env_var() -> &'static str {
        constants::gemini::API_KEY_ENV_VAR
    }
}
