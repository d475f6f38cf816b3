//! Stop-word filtering, backed by a word list loaded at startup.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;

use crate::stemmer::Language;

lazy_static! {
    static ref ENGLISH: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
    static ref ARABIC: HashSet<&'static str> = {
        let words: &[&str] = &[
            "ال","الـ","هو","هي","هم","هن","أنت","أنتم","أنتن",
            "أنا","نحن","هذا","هذه","ذلك","تلك","هؤلاء","أولئك",
            "في","من","إلى","على","عن","مع","ب","ل","ك",
            "و","أو","لكن","ثم","أم","إما","لا",
            "كان","يكون","ليس","قد","لم","لن",
            "ما","ماذا","متى","أين","كيف","لماذا","هل",
            "كل","بعض","غير","عند","حتى","بين","أن","إن",
            "التي","الذي","اللذان","اللتان","الذين","اللاتي","اللواتي"
        ];
        words.iter().copied().collect()
    };
}

/// Set of words discarded before frequency counting.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in list for `language`. Languages without a list get an empty filter.
    pub fn builtin(language: Language) -> Self {
        let words = match language {
            Language::English => ENGLISH.iter().map(|w| w.to_string()).collect(),
            Language::Arabic => ARABIC.iter().map(|w| w.to_string()).collect(),
            _ => HashSet::new(),
        };
        Self { words }
    }

    /// Load a list with one word per line; blank lines and `#` comments are skipped.
    /// Falls back to [`StopWords::builtin`] when the file cannot be read.
    pub fn load(path: &Path, language: Language) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::parse(&text);
                tracing::info!(path = %path.display(), count = list.len(), "loaded stop words");
                list
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, ?language, "stop words file unavailable, using built-in list");
                Self::builtin(language)
            }
        }
    }

    /// Parse a word list. Entries are lowercased to match tokenizer output.
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
