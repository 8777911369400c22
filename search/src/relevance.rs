//! Tiered relevance scoring over ordered candidate fields.
//!
//! Each field is matched against the query in three tiers:
//!
//! | Match                      | Primary field | Later fields   |
//! |----------------------------|---------------|----------------|
//! | equal (case-insensitive)   | `10`          | `5`            |
//! | query is a substring       | `5 × sim`     | `2.5 × sim`    |
//! | fuzzy, `sim >= threshold`  | `5 × sim`     | `2.5 × sim`    |
//!
//! The candidate's relevance is the best single field score. A candidate
//! whose every field scores zero is not a match at all.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_FUZZY_THRESHOLD, SearchConfig};
use crate::similarity::similarity_lowered;

/// Score for a full-string match on the primary field.
pub const EXACT_WEIGHT: f64 = 10.0;

/// Multiplier applied to similarity for substring and fuzzy matches.
pub const PARTIAL_WEIGHT: f64 = 5.0;

/// Factor applied to every field after the first.
pub const SECONDARY_FIELD_FACTOR: f64 = 0.5;

/// How a field matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The field equals the query.
    Exact,
    /// The query occurs literally inside the field.
    Substring,
    /// Accepted on similarity alone.
    Fuzzy,
}

impl MatchKind {
    /// Whether the query text occurs literally in the field.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::Exact | Self::Substring)
    }
}

/// The winning field of a relevance evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Position of the field in the candidate's field list.
    pub field: usize,

    /// How the field matched.
    pub kind: MatchKind,

    /// Similarity between query and field.
    pub similarity: f64,

    /// Weighted score of this field.
    pub score: f64,
}

/// Scores candidates against a query.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    fuzzy_threshold: f64,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl RelevanceScorer {
    /// Create a scorer from `config`.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }

    /// Find the best-scoring field, or `None` when nothing matches.
    ///
    /// Fields are ordered by importance. On equal scores the earlier field wins.
    pub fn best_match<S: AsRef<str>>(&self, query: &str, fields: &[S]) -> Option<FieldMatch> {
        let query = query.to_lowercase();
        let mut best: Option<FieldMatch> = None;
        for (position, field) in fields.iter().enumerate() {
            let Some(candidate) = self.score_field(&query, field.as_ref(), position) else {
                continue;
            };
            if best.is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Relevance of `fields` for `query`; `0.0` when nothing matches.
    pub fn relevance<S: AsRef<str>>(&self, query: &str, fields: &[S]) -> f64 {
        self.best_match(query, fields).map_or(0.0, |m| m.score)
    }

    /// Whether `similarity` clears the fuzzy threshold.
    pub fn accepts(&self, similarity: f64) -> bool {
        similarity >= self.fuzzy_threshold
    }

    fn score_field(&self, query: &str, field: &str, position: usize) -> Option<FieldMatch> {
        let field = field.to_lowercase();
        let factor = if position == 0 {
            1.0
        } else {
            SECONDARY_FIELD_FACTOR
        };

        if field == query {
            return Some(FieldMatch {
                field: position,
                kind: MatchKind::Exact,
                similarity: 1.0,
                score: EXACT_WEIGHT * factor,
            });
        }

        if !query.is_empty() && field.contains(query) {
            let similarity = similarity_lowered(query, &field);
            return Some(FieldMatch {
                field: position,
                kind: MatchKind::Substring,
                similarity,
                score: PARTIAL_WEIGHT * factor * similarity,
            });
        }

        let similarity = best_similarity(query, &field);
        if similarity > 0.0 && self.accepts(similarity) {
            return Some(FieldMatch {
                field: position,
                kind: MatchKind::Fuzzy,
                similarity,
                score: PARTIAL_WEIGHT * factor * similarity,
            });
        }
        None
    }
}

/// Best similarity of `query` against the whole field or any of its tokens.
///
/// Tokens split on whitespace and the separators common in identifiers, so a
/// misspelt `"overtur"` still finds `"overture-maps"`.
pub(crate) fn best_similarity(query: &str, field: &str) -> f64 {
    field
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/'))
        .filter(|token| !token.is_empty())
        .map(|token| similarity_lowered(query, token))
        .fold(similarity_lowered(query, field), f64::max)
}

/// Relevance with the default threshold.
pub fn relevance<S: AsRef<str>>(query: &str, fields: &[S]) -> f64 {
    RelevanceScorer::default().relevance(query, fields)
}
