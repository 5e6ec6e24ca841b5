pub mod gemini {
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
    pub const API_BASE: &str = "https://generativelanguage.googleapis.com";
    pub const API_VERSION: &str = "v1beta";
    pub const GENERATE_CONTENT_METHOD: &str = "generateContent";
    pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
}
