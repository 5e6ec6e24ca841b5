/// A prompt paired with the system instruction that frames it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt {
    pub prompt: String,
    pub system_instruction: String,
}

impl GenerationPrompt {
    pub fn new(prompt: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: system_instruction.into(),
        }
    }
}
