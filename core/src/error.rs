use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation was called in an index lifecycle state that does not
    /// accept it (indexing into a built index, querying before weighting).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("document already indexed: {0}")]
    DuplicateDocument(String),

    #[error("unknown document reference: {0}")]
    UnknownDocument(crate::index::DocId),

    /// A document source failed mid-pass. The whole build is abandoned;
    /// a partially populated index is never served.
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
