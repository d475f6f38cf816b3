use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// An ingested document. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: String,
    raw_content: String,
    terms: Vec<String>,
    term_frequency: HashMap<String, u32>,
}

impl Document {
    /// Build a document from already normalized terms; term counts are derived here.
    pub fn new(id: impl Into<String>, raw_content: impl Into<String>, terms: Vec<String>) -> Self {
        let term_frequency = count_terms(&terms);
        Self { id: id.into(), raw_content: raw_content.into(), terms, term_frequency }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn term_frequency(&self) -> &HashMap<String, u32> {
        &self.term_frequency
    }

    /// Number of terms, counting repeats.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn distinct_terms(&self) -> HashSet<&str> {
        self.term_frequency.keys().map(String::as_str).collect()
    }
}

/// Raw occurrence count of each term.
pub fn count_terms<S: AsRef<str>>(terms: &[S]) -> HashMap<String, u32> {
    let mut tf: HashMap<String, u32> = HashMap::new();
    for t in terms {
        *tf.entry(t.as_ref().to_string()).or_insert(0) += 1;
    }
    tf
}
