//! Error types for the summarizer.

/// Error type produced by sentence segmenters and tokenizers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by [`Summarizer`](crate::Summarizer).
///
/// None of these are transient: each one is a precondition violation by the
/// caller or a collaborator, so nothing in the library retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// More sentences were requested than the document contains.
    #[error("requested {requested} sentences but the document only has {available}")]
    InvalidRequest { requested: usize, available: usize },

    /// No token survived stopword removal, so there is no maximum count to
    /// normalize against.
    #[error("document has no scorable tokens")]
    DegenerateInput,

    /// Cut thresholds outside their allowed ranges.
    #[error("invalid summarizer config: {0}")]
    InvalidConfig(String),

    /// A segmenter or tokenizer failed. Display and `source()` are forwarded
    /// to the collaborator's own error.
    #[error(transparent)]
    Collaborator(#[from] BoxError),
}
