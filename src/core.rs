pub mod error;
pub mod http;
pub mod retry;
pub mod traits;
pub mod types;

pub use error::GenerationError;
pub use http::{HttpClient, HttpClientConfig};
pub use retry::{RetryMode, RetryPolicy};
pub use traits::TextGenerator;
pub use types::GenerationPrompt;
