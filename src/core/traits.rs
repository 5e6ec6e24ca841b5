use std::sync::Arc;

use async_trait::async_trait;

use super::{error::GenerationError, types::GenerationPrompt};

/// Anything that turns a prompt into generated text.
///
/// `Ok(None)` means the model answered without any text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &GenerationPrompt,
    ) -> Result<Option<String>, GenerationError>;
}

#[async_trait]
impl<T> TextGenerator for Arc<T>
where
    T: TextGenerator + ?Sized,
{
    async fn generate_text(
        &self,
        prompt: &GenerationPrompt,
    ) -> Result<Option<String>, GenerationError> {
        (**self).generate_text(prompt).await
    }
}
