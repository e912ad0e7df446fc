//! Property tests checked against a simple in-memory model
//!
//! The model maps each live document to its word set; every query answer
//! is recomputed from it by brute force.

use crate::common::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

type Corpus = Vec<Vec<String>>;

fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec(prop::collection::vec("[a-c]{1,4}", 1..6), 1..16)
}

fn build(corpus: &Corpus, config: FulltextConfig) -> FulltextIndex {
    let index = FulltextIndex::new(config).unwrap();
    for (doc, words) in corpus.iter().enumerate() {
        index
            .insert_words(doc as DocumentId, &WordList::new(words, 40))
            .unwrap();
    }
    index
}

fn model(corpus: &Corpus, deleted: &BTreeSet<DocumentId>) -> BTreeMap<DocumentId, BTreeSet<String>> {
    corpus
        .iter()
        .enumerate()
        .map(|(doc, words)| (doc as DocumentId, words.iter().cloned().collect()))
        .filter(|(doc, _)| !deleted.contains(doc))
        .collect()
}

fn model_complete(model: &BTreeMap<DocumentId, BTreeSet<String>>, word: &str) -> BTreeSet<DocumentId> {
    model
        .iter()
        .filter(|(_, words)| words.contains(word))
        .map(|(&doc, _)| doc)
        .collect()
}

fn model_prefix(model: &BTreeMap<DocumentId, BTreeSet<String>>, prefix: &str) -> BTreeSet<DocumentId> {
    model
        .iter()
        .filter(|(_, words)| words.iter().any(|w| w.starts_with(prefix)))
        .map(|(&doc, _)| doc)
        .collect()
}

fn probe_words() -> Vec<String> {
    let mut words = Vec::new();
    for a in ["a", "b", "c"] {
        words.push(a.to_string());
        for b in ["a", "b", "c"] {
            words.push(format!("{}{}", a, b));
        }
    }
    words.push("abca".to_string());
    words.push("zz".to_string());
    words
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ========================================================================
    // Round-trip
    // ========================================================================

    #[test]
    fn test_inserted_words_are_found(corpus in corpus_strategy()) {
        let index = build(&corpus, FulltextConfig::default());
        for (doc, words) in corpus.iter().enumerate() {
            let doc = doc as DocumentId;
            for word in words {
                let query = format!("complete:{}", word);
                prop_assert!(hits(&index, &query).contains(&doc));
                for k in 1..=word.len() {
                    let query = format!("prefix:{}", &word[..k]);
                    prop_assert!(hits(&index, &query).contains(&doc));
                }
            }
        }
    }

    #[test]
    fn test_lookups_match_model(corpus in corpus_strategy()) {
        let index = build(&corpus, FulltextConfig::with_small_limits());
        let model = model(&corpus, &BTreeSet::new());
        for word in probe_words() {
            prop_assert_eq!(hits(&index, &word), model_complete(&model, &word));
            prop_assert_eq!(hits(&index, &format!("prefix:{}", word)), model_prefix(&model, &word));
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    #[test]
    fn test_deleted_documents_never_returned(
        corpus in corpus_strategy(),
        mask in prop::collection::vec(any::<bool>(), 16),
    ) {
        let index = build(&corpus, FulltextConfig::default());
        let deleted: BTreeSet<DocumentId> = (0..corpus.len())
            .filter(|&i| mask[i])
            .map(|i| i as DocumentId)
            .collect();
        for &doc in &deleted {
            index.delete_document(doc);
        }

        let model = model(&corpus, &deleted);
        for word in probe_words() {
            let found = hits(&index, &format!("prefix:{}", word));
            prop_assert!(found.is_disjoint(&deleted));
            prop_assert_eq!(found, model_prefix(&model, &word));
        }
    }

    // ========================================================================
    // Idempotent duplicate insertion
    // ========================================================================

    #[test]
    fn test_duplicate_insertion_idempotent(corpus in corpus_strategy(), repeats in 1usize..4) {
        let once = build(&corpus, FulltextConfig::default());
        let many = build(&corpus, FulltextConfig::default());
        for _ in 0..repeats {
            for (doc, words) in corpus.iter().enumerate() {
                many.insert_words(doc as DocumentId, &WordList::new(words, 40)).unwrap();
            }
        }
        prop_assert_eq!(once.stats().posting_entries, many.stats().posting_entries);
        for word in probe_words() {
            let docs = many.search(&word, 0).unwrap();
            let unique: BTreeSet<_> = docs.iter().copied().collect();
            prop_assert_eq!(docs.len(), unique.len());
            prop_assert_eq!(unique, hits(&once, &word));
        }
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    #[test]
    fn test_operators_are_set_operations(
        corpus in corpus_strategy(),
        w1 in "[a-c]{1,2}",
        w2 in "[a-c]{1,2}",
    ) {
        let index = build(&corpus, FulltextConfig::default());
        let a = hits(&index, &w1);
        let b = hits(&index, &w2);

        let and: BTreeSet<_> = a.intersection(&b).copied().collect();
        let or: BTreeSet<_> = a.union(&b).copied().collect();
        let minus: BTreeSet<_> = a.difference(&b).copied().collect();

        prop_assert_eq!(hits(&index, &format!("{} {}", w1, w2)), and);
        prop_assert_eq!(hits(&index, &format!("{}|{}", w1, w2)), or);
        prop_assert_eq!(hits(&index, &format!("{} -{}", w1, w2)), minus);
    }

    // ========================================================================
    // Compaction safety
    // ========================================================================

    #[test]
    fn test_compaction_preserves_results(
        corpus in corpus_strategy(),
        mask in prop::collection::vec(any::<bool>(), 16),
    ) {
        let index = build(&corpus, FulltextConfig {
            compaction_ratio: 0.01,
            ..FulltextConfig::default()
        });
        for doc in (0..corpus.len()).filter(|&i| mask[i]) {
            index.delete_document(doc as DocumentId);
        }

        let queries: Vec<String> = probe_words()
            .into_iter()
            .flat_map(|w| [w.clone(), format!("prefix:{}", w), format!("prefix:a -{}", w)])
            .collect();
        let before: Vec<_> = queries.iter().map(|q| hits(&index, q)).collect();

        index.maybe_compact().unwrap();
        prop_assert_eq!(index.stats().deleted_handles, 0);

        let after: Vec<_> = queries.iter().map(|q| hits(&index, q)).collect();
        prop_assert_eq!(before, after);
    }
}
