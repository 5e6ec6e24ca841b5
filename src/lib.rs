//! # sanora-studio
//!
//! Backend core for the SANORA Interior Atelier site: a Gemini generation
//! client with bounded retry, and the studio layer that publishes projects,
//! collects leads and drafts marketing copy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sanora_studio::{ApiKey, GeminiConfig, GenerationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GenerationClient::new(GeminiConfig::from_api_key(ApiKey::Default)?)?;
//!
//!     let concept = client
//!         .generate(
//!             "A sun-drenched library with a view of the forest",
//!             "You are a professional architectural copywriter. Write exactly two sentences.",
//!         )
//!         .await?;
//!
//!     println!("{}", concept.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! Every failure is retried up to five attempts with 1s, 2s, 4s, 8s and 16s
//! waits. Use [`RetryMode::TransientOnly`] to fail fast on client errors.

pub mod core;
pub mod provider;
pub mod studio;

pub use crate::core::{
    GenerationError, GenerationPrompt, HttpClientConfig, RetryMode, RetryPolicy, TextGenerator,
};
pub use provider::{ApiKey, GeminiConfig, GenerationClient};
pub use studio::{Studio, StudioConfig, StudioError};
