//! Fixed in-process store

use crate::error::{RecommenderError, Result};
use crate::processing::skills::SkillField;
use crate::store::{DataStore, RawFreelancer, RawReview};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    freelancers: Vec<RawFreelancer>,
    reviews: Vec<RawReview>,
    failing: AtomicBool,
}

impl InMemoryStore {
    pub fn new(freelancers: Vec<RawFreelancer>, reviews: Vec<RawReview>) -> Self {
        Self {
            freelancers,
            reviews,
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent fetch fail with an upstream error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RecommenderError::UpstreamFetch(
                "in-memory store is unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl DataStore for InMemoryStore {
    async fn fetch_candidates(&self) -> Result<Vec<RawFreelancer>> {
        self.check()?;
        Ok(self.freelancers.clone())
    }

    async fn fetch_reviews(&self) -> Result<Vec<RawReview>> {
        self.check()?;
        Ok(self.reviews.clone())
    }

    async fn fetch_skill_corpus(&self) -> Result<Vec<SkillField>> {
        self.check()?;
        Ok(self.freelancers.iter().map(|f| f.skills.clone()).collect())
    }
}
