//! Query language behavior through the facade

use crate::common::*;

fn corpus() -> FulltextIndex {
    let index = new_index();
    index.index_text(1, "Müller liest die Zeitung").unwrap();
    index.index_text(2, "Señora Dépêché perpétuelle").unwrap();
    index.index_text(3, "prefix1 alpha").unwrap();
    index.index_text(4, "prefix2 alpha beta").unwrap();
    index.index_text(5, "prefix3 beta").unwrap();
    index
}

#[test]
fn test_case_insensitive_words_and_commands() {
    let index = corpus();
    assert_eq!(hits(&index, "MÜLLER"), set(&[1]));
    assert_eq!(hits(&index, "PREFIX:mül"), set(&[1]));
    assert_eq!(hits(&index, "Complete:Zeitung"), set(&[1]));
}

#[test]
fn test_accented_prefixes() {
    let index = corpus();
    assert_eq!(hits(&index, "prefix:señ"), set(&[2]));
    assert_eq!(hits(&index, "prefix:Dépê"), set(&[2]));
    assert_eq!(hits(&index, "prefix:perpé"), set(&[2]));
    assert!(hits(&index, "prefix:depe").is_empty());
}

#[test]
fn test_decomposed_query_matches_composed_text() {
    let index = corpus();
    // "señora" with n + COMBINING TILDE
    assert_eq!(hits(&index, "sen\u{0303}ora"), set(&[2]));
}

#[test]
fn test_or_chains() {
    let index = corpus();
    assert_eq!(hits(&index, "prefix1,|prefix2,|prefix3"), set(&[3, 4, 5]));
    assert_eq!(hits(&index, "prefix1|prefix2|prefix3"), set(&[3, 4, 5]));
    assert!(hits(&index, "prefix1,|prefix2,prefix3").is_empty());
    assert_eq!(hits(&index, "prefix1,prefix2,|prefix3"), set(&[5]));
}

#[test]
fn test_prefix_and_exclude_combinations() {
    let index = corpus();
    assert_eq!(hits(&index, "prefix:prefix"), set(&[3, 4, 5]));
    assert_eq!(hits(&index, "prefix:prefix -alpha"), set(&[5]));
    assert_eq!(hits(&index, "prefix:prefix,-prefix:al,-beta"), set(&[]));
    assert_eq!(hits(&index, "alpha beta"), set(&[4]));
    assert_eq!(hits(&index, "alpha|beta -prefix2"), set(&[3, 5]));
}

#[test]
fn test_separator_variants_agree() {
    let index = corpus();
    let expected = hits(&index, "alpha beta");
    for query in ["alpha,beta", "alpha\tbeta", "alpha\r\nbeta", "  alpha ,, beta  ", "+alpha +beta"] {
        assert_eq!(hits(&index, query), expected, "query {:?}", query);
    }
}

#[test]
fn test_syntax_errors() {
    let index = corpus();
    for query in ["", " , ", "-", "prefix:", "alpha,|", "nonsense:alpha"] {
        assert!(
            matches!(index.search(query, 0), Err(Error::Query(QueryError::BadSyntax(_)))),
            "expected BadSyntax for {:?}",
            query
        );
    }
}

#[test]
fn test_substring_not_supported() {
    let index = corpus();
    assert!(matches!(
        index.search("substring:lph", 0),
        Err(Error::Query(QueryError::Unsupported(_)))
    ));
}

#[test]
fn test_query_term_limit_truncates() {
    let index = FulltextIndex::new(FulltextConfig {
        max_query_terms: 2,
        ..FulltextConfig::default()
    })
    .unwrap();
    index.index_text(1, "alpha beta").unwrap();
    index.index_text(2, "alpha gamma").unwrap();

    // Third term would exclude doc 1 but is dropped
    assert_eq!(hits(&index, "alpha beta -beta"), set(&[1]));
}
