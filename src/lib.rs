//! Freelancer recommender: TF-IDF skill matching with rating and experience
//! blended into one ranking score

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod processing;
pub mod recommender;
pub mod server;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{RecommenderError, Result};
