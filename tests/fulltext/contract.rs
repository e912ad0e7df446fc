//! Reference scenario and lifecycle contracts
//!
//! Two documents, "quick brown fox" and "quick lazy dog", walked through
//! search, deletion and compaction.

use crate::common::*;

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_reference_scenario() {
    let index = fox_and_dog();

    assert_eq!(hits(&index, "quick"), set(&[1, 2]));
    assert_eq!(hits(&index, "quick -lazy"), set(&[1]));
    assert_eq!(hits(&index, "prefix:qu"), set(&[1, 2]));

    assert!(index.delete_document(2));
    assert_eq!(hits(&index, "quick"), set(&[1]));

    // 1 deleted of 2 handles is above the default ratio
    assert!(matches!(
        index.maybe_compact().unwrap(),
        CompactionOutcome::Compacted(_)
    ));
    assert_eq!(hits(&index, "quick"), set(&[1]));
    assert!(hits(&index, "lazy").is_empty());
    assert!(hits(&index, "prefix:d").is_empty());
}

#[test]
fn test_reference_scenario_from_text() {
    let index = new_index();
    index.index_text(1, "The quick brown fox").unwrap();
    index.index_text(2, "The quick, lazy dog.").unwrap();

    assert_eq!(hits(&index, "quick"), set(&[1, 2]));
    assert_eq!(hits(&index, "quick -lazy"), set(&[1]));
    assert_eq!(hits(&index, "prefix:qu"), set(&[1, 2]));
    assert_eq!(hits(&index, "the"), set(&[1, 2]));
}

// ============================================================================
// Document lifecycle
// ============================================================================

#[test]
fn test_reindexing_adds_words() {
    let index = new_index();
    insert(&index, 7, &["first"]);
    insert(&index, 7, &["second"]);

    assert_eq!(hits(&index, "first"), set(&[7]));
    assert_eq!(hits(&index, "second"), set(&[7]));
    assert_eq!(index.stats().documents, 1);
}

#[test]
fn test_deleted_document_can_be_indexed_again() {
    let index = new_index();
    insert(&index, 3, &["old"]);
    index.delete_document(3);
    insert(&index, 3, &["new"]);

    assert!(hits(&index, "old").is_empty());
    assert_eq!(hits(&index, "new"), set(&[3]));
    assert!(index.contains_document(3));
}

#[test]
fn test_delete_unknown_document() {
    let index = fox_and_dog();
    assert!(!index.delete_document(99));
    assert_eq!(index.stats().deleted_handles, 0);
}

#[test]
fn test_duplicate_insertion_is_idempotent() {
    let index = new_index();
    insert(&index, 1, &["fox"]);
    insert(&index, 1, &["fox"]);
    insert(&index, 1, &["fox", "fox"]);

    assert_eq!(index.search("fox", 0).unwrap(), vec![1]);
    assert_eq!(index.stats().posting_entries, 1);
}

#[test]
fn test_max_results_caps_output() {
    let index = new_index();
    for doc in 1..=20 {
        insert(&index, doc, &["common"]);
    }
    assert_eq!(index.search("common", 5).unwrap().len(), 5);
    assert_eq!(index.search("common", 0).unwrap().len(), 20);
    assert_eq!(index.search("common", 100).unwrap().len(), 20);
}

// ============================================================================
// Configuration and description
// ============================================================================

#[test]
fn test_config_from_toml() {
    let config = FulltextConfig::from_toml_str(
        r#"
        min_word_length = 3
        max_word_length = 16
        "#,
    )
    .unwrap();
    let index = FulltextIndex::new(config).unwrap();

    assert_eq!(
        index.describe().to_string(),
        r#"{"type":"fulltext","minLength":3,"maxWordLength":16}"#
    );

    // "ox" is below the minimum length
    index.index_text(1, "an ox and a fox").unwrap();
    assert!(hits(&index, "ox").is_empty());
    assert_eq!(hits(&index, "fox"), set(&[1]));
    assert_eq!(hits(&index, "and"), set(&[1]));
}

#[test]
fn test_invalid_toml_config() {
    let config = FulltextConfig::from_toml_str("min_word_length = 50\nmax_word_length = 10\n");
    assert!(matches!(config, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_description_json_roundtrip() {
    let index = new_index();
    let value: serde_json::Value = serde_json::from_str(&index.describe().to_string()).unwrap();
    assert_eq!(value["type"], "fulltext");
    assert_eq!(value["minLength"], 2);
    assert_eq!(value["maxWordLength"], 40);
}
