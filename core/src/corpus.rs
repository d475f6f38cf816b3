//! Document store and the shared, lock-guarded corpus handle.

use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::config::CorpusConfig;
use crate::document::Document;
use crate::error::{CorpusError, Result};
use crate::index::FrequencyIndex;
use crate::loader::{document_id, list_files, LoadReport};
use crate::pipeline::Pipeline;
use crate::scoring::{self, Similarity, TfIdf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub document_count: usize,
    pub unique_term_count: usize,
    pub average_document_length: f64,
}

/// All ingested documents plus their document-frequency index.
///
/// Every mutation goes through methods that keep `index` equal to a full
/// recompute over `documents`.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Arc<Document>>,
    index: FrequencyIndex,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and count its distinct terms.
    pub fn insert(&mut self, doc: Document) -> Arc<Document> {
        let doc = Arc::new(doc);
        self.index.update_on_add(doc.distinct_terms());
        self.documents.push(Arc::clone(&doc));
        tracing::debug!(id = doc.id(), terms = doc.len(), "added document");
        doc
    }

    /// Normalize `content` and store it under `id`. Blank content is rejected.
    pub fn add_document(&mut self, id: &str, content: &str, pipeline: &Pipeline) -> Result<Arc<Document>> {
        ensure_not_blank(id, content)?;
        let terms = pipeline.normalize(content);
        Ok(self.insert(Document::new(id, content, terms)))
    }

    /// Documents in insertion order.
    pub fn documents(&self) -> &[Arc<Document>] {
        &self.documents
    }

    pub fn document_ids(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.id()).collect()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn index(&self) -> &FrequencyIndex {
        &self.index
    }

    pub fn stats(&self) -> CorpusStats {
        let average_document_length = if self.documents.is_empty() {
            0.0
        } else {
            let total: usize = self.documents.iter().map(|d| d.len()).sum();
            total as f64 / self.documents.len() as f64
        };
        CorpusStats {
            document_count: self.documents.len(),
            unique_term_count: self.index.unique_term_count(),
            average_document_length,
        }
    }

    /// Rebuild the index from the stored documents. Returns whether it had drifted.
    pub fn full_recompute(&mut self) -> bool {
        let before = self.index.clone();
        self.index.full_recompute(&self.documents);
        before != self.index
    }

    /// Whether the stored index equals a fresh recompute.
    pub fn verify_index(&self) -> bool {
        let mut fresh = FrequencyIndex::new();
        fresh.full_recompute(&self.documents);
        fresh == self.index
    }

    pub fn reset(&mut self) {
        self.documents.clear();
        self.index.clear();
    }

    pub fn tf_idf<S: AsRef<str>>(&self, terms: &[S]) -> TfIdf {
        scoring::tf_idf(self, terms)
    }

    pub fn rank_by_similarity<S: AsRef<str>>(&self, terms: &[S]) -> Vec<Similarity> {
        scoring::rank_by_similarity(self, terms)
    }
}

fn ensure_not_blank(id: &str, content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(CorpusError::InvalidInput(format!("document '{id}' has empty content")));
    }
    Ok(())
}

/// A corpus shared between threads, paired with the pipeline that feeds it.
///
/// Writers hold the lock only for the append and index update of one
/// document, so a reader sees either all of a document or none of it.
#[derive(Clone)]
pub struct SharedCorpus {
    corpus: Arc<RwLock<Corpus>>,
    pipeline: Arc<Pipeline>,
    config: Arc<CorpusConfig>,
}

impl SharedCorpus {
    pub fn new(pipeline: Pipeline, config: CorpusConfig) -> Self {
        Self {
            corpus: Arc::new(RwLock::new(Corpus::new())),
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        }
    }

    pub fn from_config(config: CorpusConfig) -> Self {
        let pipeline = Pipeline::from_config(&config);
        Self::new(pipeline, config)
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Run `f` against one consistent view of the corpus.
    pub fn read<R>(&self, f: impl FnOnce(&Corpus) -> R) -> R {
        f(&self.corpus.read())
    }

    pub fn add_document(&self, id: &str, content: &str) -> Result<Arc<Document>> {
        // Normalize before taking the lock.
        let doc = self.prepare(id, content)?;
        Ok(self.corpus.write().insert(doc))
    }

    fn prepare(&self, id: &str, content: &str) -> Result<Document> {
        ensure_not_blank(id, content)?;
        let terms = self.pipeline.normalize(content);
        Ok(Document::new(id, content, terms))
    }

    /// Add `(id, content)` pairs one at a time, collecting failures.
    pub fn add_batch<I>(&self, items: I) -> LoadReport
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut report = LoadReport::default();
        for (id, content) in items {
            report.attempted += 1;
            match self.add_document(&id, &content) {
                Ok(_) => report.loaded += 1,
                Err(err) => {
                    tracing::warn!(%id, error = %err, "skipping document");
                    report.record_failure(&id, err.to_string());
                }
            }
        }
        self.finish_batch(&report);
        report
    }

    /// Ingest every recognized file directly under `dir`, using file names as ids.
    ///
    /// A missing or non-directory `dir` is not an error: it is logged and yields
    /// an empty report. Each document becomes visible as soon as it is added.
    pub fn load_directory(&self, dir: &Path) -> LoadReport {
        let report = self.ingest_directory(dir, |doc| {
            self.corpus.write().insert(doc);
        });
        self.finish_batch(&report);
        report
    }

    /// Load the configured corpus directory.
    pub fn load_configured(&self) -> LoadReport {
        self.load_directory(&self.config.corpus_dir)
    }

    /// Rebuild the corpus from the configured directory and swap it in.
    ///
    /// The replacement is built without holding the lock, so readers keep
    /// seeing the previous corpus until the swap.
    pub fn reload(&self) -> LoadReport {
        let mut fresh = Corpus::new();
        let report = self.ingest_directory(&self.config.corpus_dir, |doc| {
            fresh.insert(doc);
        });
        fresh.full_recompute();
        *self.corpus.write() = fresh;
        log_failures(&report);
        tracing::info!(%report, "corpus reloaded");
        report
    }

    fn ingest_directory(&self, dir: &Path, mut insert: impl FnMut(Document)) -> LoadReport {
        let Some((files, failures)) = list_files(dir, &self.config.extensions) else {
            tracing::warn!(dir = %dir.display(), "corpus directory not found");
            return LoadReport::default();
        };
        for failure in &failures {
            tracing::error!(path = %failure.path.display(), reason = %failure.reason, "failed to list corpus entry");
        }
        let mut report = LoadReport { attempted: files.len() + failures.len(), loaded: 0, failures };
        for path in files {
            let content = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "failed to read corpus file");
                    report.record_failure(&path, err.to_string());
                    continue;
                }
            };
            match self.prepare(&document_id(&path), &content) {
                Ok(doc) => {
                    insert(doc);
                    report.loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping corpus file");
                    report.record_failure(&path, err.to_string());
                }
            }
        }
        tracing::info!(dir = %dir.display(), loaded = report.loaded, attempted = report.attempted, "loaded corpus directory");
        report
    }

    pub fn reset(&self) {
        self.corpus.write().reset();
        tracing::info!("corpus reset");
    }

    pub fn stats(&self) -> CorpusStats {
        self.read(Corpus::stats)
    }

    pub fn tf_idf<S: AsRef<str>>(&self, terms: &[S]) -> TfIdf {
        self.read(|c| c.tf_idf(terms))
    }

    pub fn rank_by_similarity<S: AsRef<str>>(&self, terms: &[S]) -> Vec<Similarity> {
        self.read(|c| c.rank_by_similarity(terms))
    }

    fn finish_batch(&self, report: &LoadReport) {
        if self.corpus.write().full_recompute() {
            tracing::warn!("document frequency index had drifted, rebuilt after batch");
        }
        log_failures(report);
    }
}

fn log_failures(report: &LoadReport) {
    if !report.failures.is_empty() {
        tracing::warn!(failed = report.failures.len(), "{report}");
    }
}
