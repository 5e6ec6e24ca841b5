//! Prompt templates for the studio's generation call sites.

use crate::core::GenerationPrompt;

use super::catalogue::Project;

pub const VISION_ARCHITECT_INSTRUCTION: &str = "You are SANORA's lead interior architect. \
Based on the user's brief, provide a sophisticated design concept including: \
1. A poetic name for the space. \
2. A 3-sentence description of the atmosphere. \
3. Suggested materials (mention wood types, antique finishes). \
4. A specific biophilic color accent (like wasabi, olive, or sage). \
Keep it professional and architectural.";

pub const COPYWRITER_INSTRUCTION: &str = "You are a professional architectural copywriter. \
Write exactly two sentences. Be elegant and sophisticated.";

/// Public "Vision Architect": the visitor's brief goes through verbatim.
pub fn vision_concept(brief: &str) -> GenerationPrompt {
    GenerationPrompt::new(brief, VISION_ARCHITECT_INSTRUCTION)
}

/// Admin assistant: a two-sentence marketing blurb for a portfolio project.
pub fn project_blurb(project: &Project) -> GenerationPrompt {
    let prompt = format!(
        "Write a short, luxury-focused marketing blurb for a project named \"{}\" located in \"{}\". \
Focus on organic materials and high-end design.",
        project.name, project.location
    );
    GenerationPrompt::new(prompt, COPYWRITER_INSTRUCTION)
}
