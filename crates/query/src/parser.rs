//! Query string parsing
//!
//! Turns a query string into a list of [`Term`]s. Parsing never touches the
//! index; every error it reports is a [`QueryError`].
//!
//! A `|` inside a token starts a new or-term, so `fox|dog` and `fox,|dog`
//! parse the same.

use strata_fts_core::{normalize_word, FulltextConfig, QueryError};

/// Characters separating query tokens
const SEPARATORS: &[char] = &[' ', '\t', '\r', '\n', ','];

/// How a term's word is matched against indexed words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Indexed word must equal the term
    #[default]
    Complete,
    /// Indexed word must start with the term
    Prefix,
}

/// How a term's matches combine with the result so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// Keep only documents also matching this term (`+`, the default)
    #[default]
    And,
    /// Add documents matching this term (`|`)
    Or,
    /// Remove documents matching this term (`-`)
    Exclude,
}

/// One parsed query term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Normalized word, never empty
    pub word: String,
    /// Complete or prefix match
    pub mode: MatchMode,
    /// Combination with the preceding terms
    pub op: Operator,
}

impl Term {
    /// Create a term from an already-normalized word
    pub fn new(word: impl Into<String>, mode: MatchMode, op: Operator) -> Self {
        Term {
            word: word.into(),
            mode,
            op,
        }
    }
}

/// Parsed query: at least one term, in query order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
    ignored: usize,
}

impl Query {
    /// Terms in evaluation order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Tokens dropped because the query exceeded `max_query_terms`
    pub fn ignored_terms(&self) -> usize {
        self.ignored
    }
}

/// Parse a query string
///
/// Tokens past `config.max_query_terms` are dropped without being
/// validated. That truncation is a documented limitation, not an error.
///
/// # Errors
///
/// - `QueryError::BadSyntax` for an empty word, an unknown command, or a
///   query without terms
/// - `QueryError::Unsupported` for `substring:`
///
/// # Example
///
/// ```
/// use strata_fts_core::FulltextConfig;
/// use strata_fts_query::{parse, MatchMode, Operator};
///
/// let query = parse("Quick -prefix:laz", &FulltextConfig::default()).unwrap();
/// assert_eq!(query.terms()[0].word, "quick");
/// assert_eq!(query.terms()[1].mode, MatchMode::Prefix);
/// assert_eq!(query.terms()[1].op, Operator::Exclude);
/// ```
pub fn parse(query: &str, config: &FulltextConfig) -> Result<Query, QueryError> {
    let mut tokens = query
        .split(SEPARATORS)
        .filter(|t| !t.is_empty())
        .flat_map(split_or_terms);

    let mut terms = Vec::new();
    for token in tokens.by_ref() {
        terms.push(parse_term(token, config)?);
        if terms.len() == config.max_query_terms {
            break;
        }
    }

    let ignored = tokens.count();
    if ignored > 0 {
        tracing::debug!(
            target: "strata::fulltext",
            kept = terms.len(),
            ignored,
            "Query truncated to max_query_terms"
        );
    }

    if terms.is_empty() {
        return Err(QueryError::BadSyntax("query has no terms".to_string()));
    }
    Ok(Query { terms, ignored })
}

/// Split a token before every `|` that does not start it
fn split_or_terms(token: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in token.match_indices('|') {
        if idx > start {
            pieces.push(&token[start..idx]);
        }
        start = idx;
    }
    pieces.push(&token[start..]);
    pieces
}

fn parse_term(token: &str, config: &FulltextConfig) -> Result<Term, QueryError> {
    let mut chars = token.chars();
    let (op, rest) = match chars.next() {
        Some('+') => (Operator::And, chars.as_str()),
        Some('-') => (Operator::Exclude, chars.as_str()),
        Some('|') => (Operator::Or, chars.as_str()),
        _ => (Operator::And, token),
    };

    let (mode, raw) = match rest.split_once(':') {
        Some((command, word)) => (parse_command(command)?, word),
        None => (MatchMode::Complete, rest),
    };

    let word = normalize_word(raw, config.max_word_length);
    if word.is_empty() {
        return Err(QueryError::BadSyntax(format!(
            "empty word in term '{}'",
            token
        )));
    }
    Ok(Term { word, mode, op })
}

fn parse_command(command: &str) -> Result<MatchMode, QueryError> {
    if command.eq_ignore_ascii_case("complete") {
        Ok(MatchMode::Complete)
    } else if command.eq_ignore_ascii_case("prefix") {
        Ok(MatchMode::Prefix)
    } else if command.eq_ignore_ascii_case("substring") {
        Err(QueryError::Unsupported("substring".to_string()))
    } else {
        Err(QueryError::BadSyntax(format!(
            "unknown command '{}'",
            command
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
