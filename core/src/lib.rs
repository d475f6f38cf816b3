pub mod analysis;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod scoring;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use analysis::TextAnalysis;
pub use config::CorpusConfig;
pub use corpus::{Corpus, CorpusStats, SharedCorpus};
pub use document::Document;
pub use error::{AnalysisError, CorpusError};
pub use index::FrequencyIndex;
pub use loader::{LoadFailure, LoadReport};
pub use pipeline::{AnalysisWarning, Normalized, Pipeline};
pub use scoring::{Similarity, TfIdf, Weighting};
pub use stemmer::{Language, SnowballStemmer, Stemmer};
pub use stopwords::StopWords;
