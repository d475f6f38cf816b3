use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Letters may carry combining marks (Arabic harakat, decomposed accents).
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{M}\p{N}_']*").expect("valid regex");
}

/// Split text into lowercase tokens in reading order, after NFKC normalization.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
}
