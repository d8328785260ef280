use thiserror::Error;

/// Everything that can go wrong while building a session.
///
/// Once a session exists, keystrokes and ticks never fail.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("target must be a positive number, got {0}")]
    InvalidTarget(u32),
    #[error("corpus contains no words")]
    EmptyCorpus,
    #[error("corpus word {0:?} is empty or contains whitespace")]
    InvalidWord(String),
    #[error("session content is empty")]
    EmptyContent,
    #[error("built-in word list {0} not found")]
    MissingCorpus(String),
    #[error("unable to parse word list: {0}")]
    CorpusFormat(#[from] serde_json::Error),
}
