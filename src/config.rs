//! Configuration management for the freelancer recommender

use crate::error::{RecommenderError, Result};
use crate::recommender::engine::DEFAULT_TOP_N;
use crate::recommender::model::{ScoreWeights, ScoringProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: PathBuf,
    pub max_features: usize,
}

/// Weights and threshold captured into the artifact at training time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub skills_weight: f64,
    pub rating_weight: f64,
    pub experience_weight: f64,
    pub min_match_threshold: f64,
    pub default_top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub freelancers_table: String,
    pub reviews_table: String,
    pub timeout_secs: u64,
    pub snapshot_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Rest,
    Snapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("freelancer-recommender");

        Self {
            model: ModelConfig {
                artifact_path: data_dir.join("models").join("model.json"),
                max_features: 500,
            },
            scoring: ScoringConfig {
                skills_weight: 0.5,
                rating_weight: 0.3,
                experience_weight: 0.2,
                min_match_threshold: 0.1,
                default_top_n: DEFAULT_TOP_N,
            },
            store: StoreConfig {
                backend: StoreBackend::Rest,
                url: None,
                api_key: None,
                freelancers_table: "freelancers".to_string(),
                reviews_table: "freelancer_reviews".to_string(),
                timeout_secs: 30,
                snapshot_dir: data_dir.join("snapshot"),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_origins: vec!["*".to_string()],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str::<Config>(&content)
                .map_err(|e| RecommenderError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("freelancer-recommender")
            .join("config.toml")
    }

    /// Environment values win over the file, mirroring the deployment's `.env`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_KEY").filter(|v| !v.trim().is_empty()) {
            self.store.api_key = Some(key);
        }
        if let Some(table) = lookup("SUPABASE_TABLE").filter(|v| !v.trim().is_empty()) {
            self.store.freelancers_table = table;
        }
        if let Some(path) = lookup("MODEL_PATH").filter(|v| !v.trim().is_empty()) {
            self.model.artifact_path = PathBuf::from(path);
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.max_features == 0 {
            return Err(RecommenderError::Configuration(
                "model.max_features must be positive".to_string(),
            ));
        }

        let weights = [
            ("scoring.skills_weight", self.scoring.skills_weight),
            ("scoring.rating_weight", self.scoring.rating_weight),
            ("scoring.experience_weight", self.scoring.experience_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RecommenderError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.scoring.min_match_threshold) {
            return Err(RecommenderError::Configuration(format!(
                "scoring.min_match_threshold must be within [0, 1], got {}",
                self.scoring.min_match_threshold
            )));
        }

        if self.scoring.default_top_n == 0 {
            return Err(RecommenderError::Configuration(
                "scoring.default_top_n must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// The profile a training run bakes into its artifact
    pub fn scoring_profile(&self) -> ScoringProfile {
        ScoringProfile {
            weights: ScoreWeights {
                skills: self.scoring.skills_weight,
                rating: self.scoring.rating_weight,
                experience: self.scoring.experience_weight,
            },
            min_match_threshold: self.scoring.min_match_threshold,
        }
    }
}
