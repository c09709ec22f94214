//! Text normalization, vectorization and feature processing

pub mod features;
pub mod reviews;
pub mod skills;
pub mod text_processor;
pub mod vectorizer;
