//! TF-IDF vocabulary fitting and sparse vectorization
//!
//! Terms are tokens of two or more word characters. The vocabulary keeps the
//! `max_features` terms with the highest corpus frequency (lexical order
//! breaks ties) and assigns column indices in lexical order. IDF is smoothed:
//! `ln((1 + n) / (1 + df)) + 1`. Transformed vectors are raw counts times IDF,
//! L2-normalized.

use crate::error::{RecommenderError, Result};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Sparse vector sorted by column index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, v)| *v == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    max_features: usize,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    #[serde(skip)]
    processor: TextProcessor,
}

impl PartialEq for TfIdfVectorizer {
    fn eq(&self, other: &Self) -> bool {
        self.max_features == other.max_features
            && self.vocabulary == other.vocabulary
            && self.idf == other.idf
    }
}

#[derive(Default)]
struct TermStats {
    document_frequency: usize,
    corpus_frequency: usize,
}

impl TfIdfVectorizer {
    /// Fit over already-normalized, non-empty documents
    pub fn fit(documents: &[String], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }
        if max_features == 0 {
            return Err(RecommenderError::InvalidInput(
                "max_features must be positive".to_string(),
            ));
        }

        let processor = TextProcessor::new();
        let mut stats: BTreeMap<String, TermStats> = BTreeMap::new();

        for document in documents {
            for (term, count) in processor.term_counts(document) {
                let entry = stats.entry(term).or_default();
                entry.document_frequency += 1;
                entry.corpus_frequency += count;
            }
        }

        if stats.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        // BTreeMap iteration is lexical and the sort is stable, so equal
        // frequencies stay in lexical order.
        let mut kept: Vec<(String, TermStats)> = stats.into_iter().collect();
        if kept.len() > max_features {
            kept.sort_by_key(|(_, s)| Reverse(s.corpus_frequency));
            kept.truncate(max_features);
            kept.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, term_stats)) in kept.into_iter().enumerate() {
            let df = term_stats.document_frequency as f64;
            idf.push(((1.0 + n_documents) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            max_features,
            vocabulary,
            idf,
            processor,
        })
    }

    /// Vectorize one document; unseen terms carry no weight
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for (term, count) in self.processor.term_counts(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                weights.insert(index, count as f64 * self.idf[index]);
            }
        }

        let norm = weights.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }

        SparseVector::from_sorted(weights.into_iter().map(|(i, v)| (i, v / norm)).collect())
    }

    pub fn transform_all(&self, texts: &[String]) -> Vec<SparseVector> {
        texts.iter().map(|text| self.transform(text)).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    /// Structural check for deserialized artifacts
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(RecommenderError::ModelLoading(format!(
                "vocabulary has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if self.vocabulary.values().any(|&index| index >= self.idf.len()) {
            return Err(RecommenderError::ModelLoading(
                "vocabulary index out of range".to_string(),
            ));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(RecommenderError::ModelLoading(
                "non-finite idf weight".to_string(),
            ));
        }
        Ok(())
    }
}
