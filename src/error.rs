//! Error handling for the freelancer recommender

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Training corpus has no usable skill entries")]
    EmptyCorpus,

    #[error("No freelancers found in the data store")]
    NoCandidates,

    #[error("No freelancers match the requested skills: {}", .skills.join(", "))]
    NoMatch { skills: Vec<String> },

    #[error("No vocabulary model is loaded")]
    ModelNotLoaded,

    #[error("Data store fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Incompatible model artifact: format version {found}, expected {expected}")]
    IncompatibleArtifact { found: u32, expected: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

/// Transport, status and decode failures all surface as upstream fetch errors
impl From<reqwest::Error> for RecommenderError {
    fn from(err: reqwest::Error) -> Self {
        RecommenderError::UpstreamFetch(err.to_string())
    }
}
