use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::document::Document;

/// Document frequency per term: how many stored documents contain it at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyIndex {
    df: HashMap<String, u32>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more document for each of `distinct_terms`.
    /// Callers must pass each term at most once per document.
    pub fn update_on_add<'a, I>(&mut self, distinct_terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in distinct_terms {
            *self.df.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    /// Rebuild from scratch over `documents`.
    pub fn full_recompute(&mut self, documents: &[Arc<Document>]) {
        self.df.clear();
        for doc in documents {
            self.update_on_add(doc.term_frequency().keys().map(String::as_str));
        }
    }

    /// Stored count, `0` for a term never seen.
    pub fn document_frequency_of(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    pub fn get(&self, term: &str) -> Option<u32> {
        self.df.get(term).copied()
    }

    pub fn unique_term_count(&self) -> usize {
        self.df.len()
    }

    pub fn clear(&mut self) {
        self.df.clear();
    }
}
