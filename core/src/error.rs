use thiserror::Error;

/// Errors surfaced to callers of the corpus engine.
///
/// Failures local to one token or one file in a batch never show up here;
/// they are absorbed and reported as diagnostics instead. An unavailable
/// corpus directory is not an error either.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Blank document or query text.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Returned by a stemmer that could not analyze a token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot analyze '{token}': {reason}")]
pub struct AnalysisError {
    pub token: String,
    pub reason: String,
}

impl AnalysisError {
    pub fn new(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { token: token.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
