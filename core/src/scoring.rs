//! TF-IDF weighting and cosine-similarity ranking over a corpus.
//!
//! Everything here reads the corpus and never mutates it.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::TOP_K;
use crate::corpus::Corpus;
use crate::document::count_terms;

/// How [`TfIdf::scores`] were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    TfIdf,
    /// The corpus was empty, so scores are plain normalized term frequency.
    TermFrequencyOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TfIdf {
    pub weighting: Weighting,
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity {
    pub id: String,
    pub score: f64,
}

/// Normalized term frequency: occurrences divided by the query length.
pub fn term_frequency<S: AsRef<str>>(terms: &[S]) -> HashMap<String, f64> {
    let total = terms.len() as f64;
    count_terms(terms)
        .into_iter()
        .map(|(term, count)| (term, count as f64 / total))
        .collect()
}

/// Weight each distinct query term by `tf * ln((N + 1) / (df + 1))`.
///
/// Unseen terms use `df = 1`. On an empty corpus the IDF factor is skipped
/// entirely and [`Weighting::TermFrequencyOnly`] is reported.
pub fn tf_idf<S: AsRef<str>>(corpus: &Corpus, terms: &[S]) -> TfIdf {
    let tf = term_frequency(terms);
    let n = corpus.document_count();
    if n == 0 {
        tracing::warn!("empty corpus, returning plain term frequency");
        return TfIdf { weighting: Weighting::TermFrequencyOnly, scores: tf };
    }
    let n = n as f64;
    let scores = tf
        .into_iter()
        .map(|(term, tf)| {
            let df = corpus.index().get(&term).unwrap_or(1) as f64;
            let idf = ((n + 1.0) / (df + 1.0)).ln();
            (term, tf * idf)
        })
        .collect();
    TfIdf { weighting: Weighting::TfIdf, scores }
}

/// Cosine similarity of two raw-count vectors; `0.0` if either has zero magnitude.
pub fn cosine_similarity(a: &HashMap<String, u32>, b: &HashMap<String, u32>) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (term, &x) in a {
        let x = x as f64;
        norm_a += x * x;
        if let Some(&y) = b.get(term) {
            dot += x * y as f64;
        }
    }
    let norm_b: f64 = b.values().map(|&y| (y as f64) * (y as f64)).sum();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score every stored document against the query and keep the best [`TOP_K`].
///
/// Ties keep insertion order.
pub fn rank_by_similarity<S: AsRef<str>>(corpus: &Corpus, terms: &[S]) -> Vec<Similarity> {
    if corpus.document_count() == 0 {
        tracing::warn!("empty corpus, nothing to rank");
        return Vec::new();
    }
    let query = count_terms(terms);
    let mut scored: Vec<Similarity> = corpus
        .documents()
        .iter()
        .map(|doc| Similarity { id: doc.id().to_string(), score: cosine_similarity(&query, doc.term_frequency()) })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(TOP_K);
    scored
}
