use serde::Serialize;
use std::collections::HashMap;

use crate::corpus::SharedCorpus;
use crate::error::{CorpusError, Result};
use crate::pipeline::AnalysisWarning;
use crate::scoring::{Similarity, Weighting};

/// Result of analyzing one ad-hoc text against the corpus.
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub tokens: Vec<String>,
    pub terms: Vec<String>,
    pub weighting: Weighting,
    pub tfidf: HashMap<String, f64>,
    pub similarities: Vec<Similarity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
}

impl SharedCorpus {
    /// Normalize `text`, then weight and rank it against a single snapshot of the corpus.
    pub fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        if text.trim().is_empty() {
            return Err(CorpusError::InvalidInput("text to analyze cannot be empty".into()));
        }
        tracing::info!("starting text analysis");
        let normalized = self.pipeline().run(text);
        tracing::debug!(tokens = normalized.tokens.len(), terms = normalized.terms.len(), "normalized text");

        let (tfidf, similarities) =
            self.read(|c| (c.tf_idf(&normalized.terms), c.rank_by_similarity(&normalized.terms)));

        Ok(TextAnalysis {
            tokens: normalized.tokens,
            terms: normalized.terms,
            weighting: tfidf.weighting,
            tfidf: tfidf.scores,
            similarities,
            warnings: normalized.warnings,
        })
    }
}
