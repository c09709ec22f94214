//! Request/response types of the serving boundary

use crate::error::{RecommenderError, Result};
use crate::recommender::engine::{Query, ScoredResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub top_n: Option<i64>,
}

impl RecommendRequest {
    pub fn new(skills: Vec<String>, top_n: Option<i64>) -> Self {
        Self { skills, top_n }
    }

    /// Validated query; a missing `top_n` falls back to `default_top_n`
    pub fn into_query(self, default_top_n: usize) -> Result<Query> {
        let top_n = match self.top_n {
            None => default_top_n,
            Some(n) if n > 0 => usize::try_from(n).map_err(|_| {
                RecommenderError::InvalidInput(format!("top_n is out of range: {}", n))
            })?,
            Some(n) => {
                return Err(RecommenderError::InvalidInput(format!(
                    "top_n must be a positive integer, got {}",
                    n
                )))
            }
        };

        let query = Query::new(self.skills, top_n);
        query.validate()?;
        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub total: usize,
    pub recommendations: Vec<ScoredResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendResponse {
    pub fn success(recommendations: Vec<ScoredResult>) -> Self {
        Self {
            success: true,
            total: recommendations.len(),
            recommendations,
            message: None,
            error: None,
        }
    }

    /// "No data" and "no match" are reported as messages; everything else is
    /// an error
    pub fn failure(err: &RecommenderError) -> Self {
        let (message, error) = match err {
            RecommenderError::NoCandidates | RecommenderError::NoMatch { .. } => {
                (Some(err.to_string()), None)
            }
            other => (None, Some(other.to_string())),
        };

        Self {
            success: false,
            total: 0,
            recommendations: Vec::new(),
            message,
            error,
        }
    }

    pub fn from_result(result: Result<Vec<ScoredResult>>) -> Self {
        match result {
            Ok(recommendations) => Self::success(recommendations),
            Err(err) => Self::failure(&err),
        }
    }
}
