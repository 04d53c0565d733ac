use thiserror::Error;

use crate::core::record::RecordId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Mutation failed for record '{record_id}': {reason}")]
    MutationFailed { record_id: RecordId, reason: String },

    #[error("Store error: {0}")]
    StoreFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::StoreFailed(err.to_string())
    }
}
