//! PostgREST (Supabase) reader

use crate::config::StoreConfig;
use crate::error::{RecommenderError, Result};
use crate::processing::skills::SkillField;
use crate::store::{DataStore, RawFreelancer, RawReview};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const FREELANCER_COLUMNS: &str = "id,username,skills,experience";
const REVIEW_COLUMNS: &str = "freelancer,stars";
const CORPUS_COLUMNS: &str = "skills";

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    freelancers_table: String,
    reviews_table: String,
}

#[derive(Deserialize)]
struct SkillsRow {
    #[serde(default)]
    skills: SkillField,
}

impl RestStore {
    pub fn new(
        base_url: &str,
        api_key: &str,
        freelancers_table: &str,
        reviews_table: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| RecommenderError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            freelancers_table: freelancers_table.to_string(),
            reviews_table: reviews_table.to_string(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            RecommenderError::Configuration(
                "store.url (or SUPABASE_URL) is required for the rest backend".to_string(),
            )
        })?;
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            RecommenderError::Configuration(
                "store.api_key (or SUPABASE_KEY) is required for the rest backend".to_string(),
            )
        })?;

        Self::new(
            url,
            api_key,
            &config.freelancers_table,
            &config.reviews_table,
            config.timeout_secs,
        )
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, columns: &str) -> Result<Vec<T>> {
        let url = self.table_url(table);
        debug!("GET {} select={}", url, columns);

        let response = self
            .client
            .get(&url)
            .query(&[("select", columns)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommenderError::UpstreamFetch(format!(
                "{} returned HTTP {}: {}",
                table,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        // A null body is treated as an empty table
        let rows: Option<Vec<T>> = response.json().await?;
        let rows = rows.unwrap_or_default();
        info!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }
}

impl DataStore for RestStore {
    async fn fetch_candidates(&self) -> Result<Vec<RawFreelancer>> {
        self.select(&self.freelancers_table, FREELANCER_COLUMNS).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<RawReview>> {
        self.select(&self.reviews_table, REVIEW_COLUMNS).await
    }

    async fn fetch_skill_corpus(&self) -> Result<Vec<SkillField>> {
        let rows: Vec<SkillsRow> = self.select(&self.freelancers_table, CORPUS_COLUMNS).await?;
        Ok(rows.into_iter().map(|row| row.skills).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://x.supabase.co/", "key", "freelancers", "reviews", 5).unwrap();
        assert_eq!(
            store.table_url("freelancers"),
            "https://x.supabase.co/rest/v1/freelancers"
        );
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let config = Config::default();
        assert!(matches!(
            RestStore::from_config(&config.store),
            Err(RecommenderError::Configuration(_))
        ));

        let mut store_config = config.store.clone();
        store_config.url = Some("https://x.supabase.co".to_string());
        store_config.api_key = Some("key".to_string());
        assert!(RestStore::from_config(&store_config).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_upstream_error() {
        let store = RestStore::new("http://127.0.0.1:1", "key", "freelancers", "reviews", 1).unwrap();
        assert!(matches!(
            store.fetch_candidates().await,
            Err(RecommenderError::UpstreamFetch(_))
        ));
    }
}
