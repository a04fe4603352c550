#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// A single transport/model failure, before retry handling.
    #[error("Model error: {0}")]
    Model(String),

    /// Transport/model failure that survived every retry attempt.
    #[error("Generation error after {attempts} attempt(s): {message}")]
    Generation { message: String, attempts: u32 },

    /// Model output that no repair strategy could turn into JSON.
    /// Carries the original text, the extracted candidate, and a short
    /// whitespace-collapsed preview for diagnostics.
    #[error("Parse error: {message} (preview: {preview})")]
    Parse { message: String, raw: String, extracted: String, preview: String },

    /// Parsed JSON that fails the content schema for its type.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bubbled unmodified from the storage collaborator.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CourseError>;

impl CourseError {
    /// Short, user-facing message without raw model output or previews.
    ///
    /// The full `Display` form is only surfaced when diagnostics are
    /// enabled (non-production configuration).
    pub fn human_message(&self) -> String {
        match self {
            CourseError::Model(_) => "The generation service rejected the request".to_string(),
            CourseError::Generation { attempts, .. } => {
                format!("Content generation failed after {attempts} attempt(s)")
            }
            CourseError::Parse { .. } => {
                "The generation service returned unusable output".to_string()
            }
            CourseError::Validation(_) => {
                "Generated content did not match the expected structure".to_string()
            }
            CourseError::Persistence(_) => "Saving course content failed".to_string(),
            CourseError::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}
