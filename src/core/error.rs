use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    #[error("Network error: {message}")]
    Network { message: String, source: BoxError },

    /// The endpoint answered with a non-success status.
    #[error("API error ({status_code}): {message}")]
    Api { message: String, status_code: u16 },

    /// A success response whose body could not be read or decoded.
    #[error("Parse error: {message}")]
    Parse { message: String, source: BoxError },

    /// Every attempt in the retry budget failed.
    #[error("Failed to generate content after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<GenerationError>,
    },

    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Network failures, rate limiting and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Network { .. } => true,
            GenerationError::Api { status_code, .. } => {
                *status_code == 429 || (500..600).contains(status_code)
            }
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            GenerationError::Api { status_code, .. } => Some(*status_code),
            GenerationError::Exhausted { last, .. } => last.status_code(),
            _ => None,
        }
    }
}
