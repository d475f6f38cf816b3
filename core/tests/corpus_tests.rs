use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use textmine_core::{Corpus, CorpusConfig, CorpusError, Document, Language, SharedCorpus, Weighting};

fn doc(id: &str, terms: &[&str]) -> Document {
    Document::new(id, terms.join(" "), terms.iter().map(|t| t.to_string()).collect())
}

/// Document frequency recomputed by brute force over the stored documents.
fn assert_index_consistent(corpus: &Corpus) {
    let vocab: HashSet<&String> = corpus.documents().iter().flat_map(|d| d.term_frequency().keys()).collect();
    for term in &vocab {
        let expected = corpus.documents().iter().filter(|d| d.term_frequency().contains_key(*term)).count() as u32;
        assert_eq!(corpus.index().document_frequency_of(term), expected, "df mismatch for {term}");
    }
    assert_eq!(corpus.index().unique_term_count(), vocab.len());
    assert!(corpus.verify_index());
}

fn cat_dog_corpus() -> Corpus {
    let mut c = Corpus::new();
    c.insert(doc("D1", &["cat", "cat", "dog"]));
    c.insert(doc("D2", &["cat", "dog", "dog"]));
    c
}

#[test]
fn cat_dog_scenario() {
    let c = cat_dog_corpus();
    assert_index_consistent(&c);

    let query = ["cat", "cat"];
    let tfidf = c.tf_idf(&query);
    assert_eq!(tfidf.weighting, Weighting::TfIdf);
    assert_eq!(tfidf.scores.len(), 1);
    assert!(tfidf.scores["cat"].abs() < 1e-12);

    let ranking = c.rank_by_similarity(&query);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].id, "D1");
    assert_eq!(ranking[1].id, "D2");
    assert!((ranking[0].score - 4.0 / (2.0 * 5f64.sqrt())).abs() < 1e-9);
    assert!((ranking[1].score - 2.0 / (2.0 * 5f64.sqrt())).abs() < 1e-9);
}

#[test]
fn tfidf_falls_back_to_term_frequency_on_empty_corpus() {
    let c = Corpus::new();
    let tfidf = c.tf_idf(&["a", "a", "b"]);
    assert_eq!(tfidf.weighting, Weighting::TermFrequencyOnly);
    assert!((tfidf.scores["a"] - 2.0 / 3.0).abs() < 1e-12);
    assert!((tfidf.scores["b"] - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn unseen_term_uses_df_of_one() {
    // One document: ln((1 + 1) / (1 + 1)) = 0 for an unseen term.
    let mut c = Corpus::new();
    c.insert(doc("only", &["cat"]));
    let tfidf = c.tf_idf(&["bird"]);
    assert_eq!(tfidf.scores["bird"], 0.0);

    // Three documents: unseen term weighs ln(4 / 2), same as a term in one document.
    c.insert(doc("two", &["dog"]));
    c.insert(doc("three", &["dog"]));
    let tfidf = c.tf_idf(&["bird", "cat"]);
    let expected = 0.5 * (4.0f64 / 2.0).ln();
    assert!((tfidf.scores["bird"] - expected).abs() < 1e-12);
    assert!((tfidf.scores["cat"] - expected).abs() < 1e-12);
}

#[test]
fn tfidf_of_empty_query_is_empty() {
    let c = cat_dog_corpus();
    assert!(c.tf_idf::<&str>(&[]).scores.is_empty());
}

#[test]
fn identical_vectors_score_exactly_one() {
    let c = cat_dog_corpus();
    let ranking = c.rank_by_similarity(&["dog", "cat", "dog"]);
    assert_eq!(ranking[0].id, "D2");
    assert!((ranking[0].score - 1.0).abs() < 1e-12);
    assert!(ranking.iter().all(|s| (0.0..=1.0 + 1e-12).contains(&s.score)));
}

#[test]
fn empty_query_scores_every_document_zero_in_insertion_order() {
    let mut c = Corpus::new();
    for i in 0..7 {
        c.insert(doc(&format!("d{i}"), &["x"]));
    }
    let ranking = c.rank_by_similarity::<&str>(&[]);
    let ids: Vec<&str> = ranking.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["d0", "d1", "d2", "d3", "d4"]);
    assert!(ranking.iter().all(|s| s.score == 0.0));
}

#[test]
fn ranking_on_empty_corpus_is_empty() {
    assert!(Corpus::new().rank_by_similarity(&["cat"]).is_empty());
}

#[test]
fn ties_keep_insertion_order() {
    let mut c = Corpus::new();
    c.insert(doc("first", &["cat"]));
    c.insert(doc("better", &["cat", "cat"]));
    c.insert(doc("second", &["cat"]));
    c.insert(doc("miss", &["dog"]));
    let ranking = c.rank_by_similarity(&["cat", "dog"]);
    let ids: Vec<&str> = ranking.iter().map(|s| s.id.as_str()).collect();
    // cat-only documents all score 1/sqrt(2); "miss" also does.
    assert_eq!(ids, vec!["first", "better", "second", "miss"]);
}

#[test]
fn adds_are_monotone_and_keep_the_invariant() {
    let mut c = Corpus::new();
    let batches: [&[&str]; 4] = [&["a", "b", "a"], &["b", "c"], &[], &["a", "c", "d"]];
    let mut last_count = 0;
    let mut last_df: Vec<(String, u32)> = Vec::new();
    for (i, terms) in batches.iter().enumerate() {
        c.insert(doc(&format!("d{i}"), terms));
        assert!(c.document_count() > last_count);
        for (term, df) in &last_df {
            assert!(c.index().document_frequency_of(term) >= *df);
        }
        assert_index_consistent(&c);
        last_count = c.document_count();
        last_df = ["a", "b", "c", "d"].iter().map(|t| (t.to_string(), c.index().document_frequency_of(t))).collect();
    }
    assert_eq!(c.index().document_frequency_of("a"), 2);
    assert_eq!(c.stats().average_document_length, 8.0 / 4.0);
}

#[test]
fn duplicate_ids_are_separate_entries() {
    let mut c = Corpus::new();
    c.insert(doc("same", &["cat"]));
    c.insert(doc("same", &["cat", "dog"]));
    assert_eq!(c.document_count(), 2);
    assert_eq!(c.index().document_frequency_of("cat"), 2);
    assert_eq!(c.document_ids(), vec!["same", "same"]);
}

#[test]
fn full_recompute_is_idempotent_and_reports_no_drift() {
    let mut c = cat_dog_corpus();
    assert!(!c.full_recompute());
    let once = c.index().clone();
    assert!(!c.full_recompute());
    assert_eq!(&once, c.index());
}

fn english(dir: &std::path::Path) -> CorpusConfig {
    CorpusConfig { corpus_dir: dir.to_path_buf(), language: Language::English, ..Default::default() }
}

#[test]
fn load_directory_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "Cats chase dogs").unwrap();
    fs::write(dir.path().join("b.txt"), "Dogs chase cats and birds").unwrap();
    fs::write(dir.path().join("blank.txt"), "   \n").unwrap();
    fs::write(dir.path().join("binary.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    fs::write(dir.path().join("notes.md"), "ignored").unwrap();

    let shared = SharedCorpus::from_config(english(dir.path()));
    let report = shared.load_configured();
    assert_eq!(report.attempted, 4);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.to_string(), "succeeded: 2 of 4");

    shared.read(|c| {
        assert_eq!(c.document_ids(), vec!["a.txt", "b.txt"]);
        assert_index_consistent(c);
        assert_eq!(c.index().document_frequency_of("cat"), 2);
        assert_eq!(c.index().document_frequency_of("bird"), 1);
    });
}

#[test]
fn missing_directory_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let shared = SharedCorpus::from_config(english(&dir.path().join("absent")));
    let report = shared.load_configured();
    assert_eq!(report.loaded, 0);
    assert_eq!(report.attempted, 0);
    assert_eq!(shared.stats().document_count, 0);
}

#[test]
fn corpus_path_that_is_a_file_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("corpus");
    fs::write(&file, "not a directory").unwrap();
    let shared = SharedCorpus::from_config(english(&file));
    let report = shared.load_configured();
    assert_eq!(report.loaded, 0);
    assert_eq!(report.attempted, 0);
    assert!(report.failures.is_empty());
    assert_eq!(shared.reload().loaded, 0);
    assert_eq!(shared.stats().document_count, 0);
}

#[test]
fn reload_swaps_the_corpus_in_one_step() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("d{i:02}.txt")), format!("shared words number{i}")).unwrap();
    }
    let shared = SharedCorpus::from_config(english(dir.path()));
    assert_eq!(shared.load_configured().loaded, 20);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.read(|c| {
                        assert_eq!(c.document_count(), 20);
                        assert!(c.verify_index());
                    });
                }
            })
        })
        .collect();
    for _ in 0..10 {
        assert_eq!(shared.reload().loaded, 20);
    }
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn reload_replaces_the_corpus() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "apples and pears").unwrap();
    let shared = SharedCorpus::from_config(english(dir.path()));
    shared.add_document("extra", "bananas").unwrap();
    shared.load_configured();
    assert_eq!(shared.stats().document_count, 2);

    let report = shared.reload();
    assert_eq!(report.loaded, 1);
    assert_eq!(shared.read(|c| c.document_ids().iter().map(|s| s.to_string()).collect::<Vec<_>>()), vec!["a.txt"]);
}

#[test]
fn shared_add_rejects_blank_content() {
    let shared = SharedCorpus::from_config(CorpusConfig::default());
    assert!(matches!(shared.add_document("x", " "), Err(CorpusError::InvalidInput(_))));
    let report = shared.add_batch(vec![("ok".to_string(), "fine words".to_string()), ("empty".to_string(), String::new())]);
    assert_eq!(report.loaded, 1);
    assert_eq!(report.failures.len(), 1);
}

#[test]
fn analyze_combines_pipeline_and_scoring() {
    let shared = SharedCorpus::from_config(CorpusConfig::default());
    let empty = shared.analyze("cats and dogs").unwrap();
    assert_eq!(empty.weighting, Weighting::TermFrequencyOnly);
    assert!(empty.similarities.is_empty());
    assert_eq!(empty.tokens, vec!["cats", "and", "dogs"]);
    assert_eq!(empty.terms, vec!["cat", "dog"]);

    shared.add_document("d1", "cats cats dogs").unwrap();
    shared.add_document("d2", "cats dogs dogs").unwrap();
    let result = shared.analyze("The cats, the cats!").unwrap();
    assert_eq!(result.weighting, Weighting::TfIdf);
    assert_eq!(result.similarities[0].id, "d1");
    assert!(result.tfidf["cat"].abs() < 1e-12);

    assert!(matches!(shared.analyze("\n"), Err(CorpusError::InvalidInput(_))));
}

#[test]
fn concurrent_readers_never_see_partial_documents() {
    let shared = SharedCorpus::from_config(CorpusConfig::default());
    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for i in 0..200 {
                shared.add_document(&format!("d{i}"), &format!("word{} shared common{}", i, i % 7)).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.read(|c| {
                        assert!(c.verify_index());
                        assert_eq!(c.index().document_frequency_of("share") as usize, c.document_count());
                    });
                }
            })
        })
        .collect();
    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(shared.stats().document_count, 200);
    let docs = shared.read(|c| c.documents().iter().map(Arc::clone).collect::<Vec<_>>());
    assert_eq!(docs.len(), 200);
}
