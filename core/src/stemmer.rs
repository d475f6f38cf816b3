use rust_stemmers::{Algorithm, Stemmer as Snowball};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Languages with a bundled stemmer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Arabic,
    French,
    German,
    Spanish,
}

impl Language {
    fn algorithm(self) -> Algorithm {
        match self {
            Language::English => Algorithm::English,
            Language::Arabic => Algorithm::Arabic,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Spanish => Algorithm::Spanish,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "arabic" | "ar" => Ok(Language::Arabic),
            "french" | "fr" => Ok(Language::French),
            "german" | "de" => Ok(Language::German),
            "spanish" | "es" => Ok(Language::Spanish),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "english",
            Language::Arabic => "arabic",
            Language::French => "french",
            Language::German => "german",
            Language::Spanish => "spanish",
        };
        f.write_str(name)
    }
}

/// Reduces a token to its root form.
///
/// `Ok(None)` means no analysis was found and the caller keeps the token as is.
/// `Err` is a failure to analyze; the pipeline recovers from it the same way
/// but records a warning.
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> Result<Option<String>, AnalysisError>;
}

/// Snowball stemmer for one language.
pub struct SnowballStemmer {
    inner: Snowball,
    language: Language,
}

impl SnowballStemmer {
    pub fn new(language: Language) -> Self {
        Self { inner: Snowball::create(language.algorithm()), language }
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer").field("language", &self.language).finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> Result<Option<String>, AnalysisError> {
        let stem = self.inner.stem(token);
        if stem.is_empty() {
            return Ok(None);
        }
        Ok(Some(stem.into_owned()))
    }
}
