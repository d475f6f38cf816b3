//! Lexical pipeline: tokenizer → stop-word filter → stemmer.

use serde::Serialize;
use std::fmt;

use crate::config::CorpusConfig;
use crate::stemmer::{SnowballStemmer, Stemmer};
use crate::stopwords::StopWords;
use crate::tokenizer::tokenize;

/// A token the stemmer failed on. The token was kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisWarning {
    pub token: String,
    pub reason: String,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Raw tokenizer output, stop words included.
    pub tokens: Vec<String>,
    /// Stop words removed, remaining tokens stemmed.
    pub terms: Vec<String>,
    pub warnings: Vec<AnalysisWarning>,
}

pub struct Pipeline {
    stop_words: StopWords,
    stemmer: Box<dyn Stemmer>,
}

impl Pipeline {
    pub fn new(stop_words: StopWords, stemmer: Box<dyn Stemmer>) -> Self {
        Self { stop_words, stemmer }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        let stop_words = match &config.stop_words {
            Some(path) => StopWords::load(path, config.language),
            None => StopWords::builtin(config.language),
        };
        Self::new(stop_words, Box::new(SnowballStemmer::new(config.language)))
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalize `text` into its ordered term sequence. Never fails.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.run(text).terms
    }

    pub fn run(&self, text: &str) -> Normalized {
        let tokens = tokenize(text);
        let mut terms = Vec::with_capacity(tokens.len());
        let mut warnings = Vec::new();
        for token in &tokens {
            if self.stop_words.is_stop_word(token) {
                tracing::debug!(%token, "skipping stop word");
                continue;
            }
            match self.stemmer.stem(token) {
                Ok(Some(stem)) => terms.push(stem),
                Ok(None) => terms.push(token.clone()),
                Err(err) => {
                    tracing::warn!(%token, reason = %err.reason, "stemming failed, keeping token");
                    warnings.push(AnalysisWarning { token: token.clone(), reason: err.reason });
                    terms.push(token.clone());
                }
            }
        }
        Normalized { tokens, terms, warnings }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("stop_words", &self.stop_words.len()).finish_non_exhaustive()
    }
}
