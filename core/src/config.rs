//! Defaults and runtime configuration for the corpus engine.
//!
//! Compile-time defaults live here as constants; the binaries override them
//! from CLI arguments and environment variables.

use std::path::PathBuf;

use crate::stemmer::Language;

/// Number of documents returned by a similarity ranking.
pub const TOP_K: usize = 5;

/// Directory scanned for corpus files at startup and on reload.
pub const DEFAULT_CORPUS_DIR: &str = "corpus";

/// File extensions treated as plain-text corpus documents.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt"];

/// Default HTTP bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Everything needed to build a [`SharedCorpus`](crate::SharedCorpus).
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Directory loaded at startup and by `reload`.
    pub corpus_dir: PathBuf,
    /// Recognized extensions, without the leading dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Optional stop-word list; the built-in list for `language` is used when absent or unreadable.
    pub stop_words: Option<PathBuf>,
    pub language: Language,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            stop_words: None,
            language: Language::default(),
        }
    }
}
