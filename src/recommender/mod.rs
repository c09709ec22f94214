//! Training and scoring components

pub mod artifact;
pub mod builder;
pub mod engine;
pub mod model;
pub mod registry;
pub mod retrain;

pub use artifact::{ArtifactStore, JsonArtifactStore};
pub use builder::VocabularyBuilder;
pub use engine::{Candidate, Query, ScoredResult, ScoringEngine};
pub use model::{ScoreWeights, ScoringProfile, VocabularyModel};
pub use registry::ModelRegistry;
pub use retrain::Retrainer;
