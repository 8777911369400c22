//! Hybrid ranking of accounts and products.

use std::cmp::Ordering;
use std::collections::HashSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::relevance::RelevanceScorer;

/// Where a ranked candidate was discovered.
///
/// Declaration order is the tie-break order: accounts rank before products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Account,
    Product,
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Account name, or `account/product_id` for products.
    pub label: String,

    /// Pool the candidate came from.
    #[serde(rename = "kind")]
    pub provenance: Provenance,

    /// Relevance score; always positive.
    pub score: f64,

    /// Whether the winning field contained the query literally.
    #[serde(skip)]
    pub exact_match: bool,
}

/// Merges account and product pools into one ranked list.
#[derive(Debug, Clone)]
pub struct HybridRanker {
    scorer: RelevanceScorer,
}

impl Default for HybridRanker {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl HybridRanker {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(config),
        }
    }

    /// Rank `accounts` and `products` for `query`, keeping at most `top_k` hits.
    ///
    /// Products are `(account, product_id)` pairs, scored with the product id
    /// as primary field and the account as secondary. Zero-score candidates
    /// are dropped, so fewer than `top_k` hits may come back.
    pub fn rank<A, P>(
        &self,
        query: &str,
        accounts: &[A],
        products: &[(A, P)],
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>>
    where
        A: AsRef<str>,
        P: AsRef<str>,
    {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        if top_k < 1 {
            return Err(SearchError::InvalidArgument(format!(
                "top_k must be at least 1, got {top_k}"
            )));
        }

        let mut seen: HashSet<(Provenance, String)> = HashSet::new();
        let mut hits: Vec<(usize, ScoredCandidate)> = Vec::new();

        let account_pool = accounts.iter().map(|account| {
            let account = account.as_ref();
            (Provenance::Account, account.to_string(), vec![account])
        });
        let product_pool = products.iter().map(|(account, product)| {
            let (account, product) = (account.as_ref(), product.as_ref());
            (
                Provenance::Product,
                format!("{account}/{product}"),
                vec![product, account],
            )
        });

        let pool = account_pool.chain(product_pool).enumerate();
        for (discovery, (provenance, label, fields)) in pool {
            if !seen.insert((provenance, label.clone())) {
                continue;
            }
            let Some(best) = self.scorer.best_match(query, &fields) else {
                continue;
            };
            if best.score <= 0.0 {
                continue;
            }
            hits.push((
                discovery,
                ScoredCandidate {
                    label,
                    provenance,
                    score: best.score,
                    exact_match: best.kind.is_literal(),
                },
            ));
        }

        let candidates = accounts.len() + products.len();
        let scored = hits.len();
        hits.sort_by(|(ia, a), (ib, b)| compare_hits(a, *ia, b, *ib));
        hits.truncate(top_k);

        debug!(
            "ranked {candidates} candidates for {query:?}: {scored} scored, {} returned",
            hits.len()
        );

        Ok(hits.into_iter().map(|(_, hit)| hit).collect())
    }
}

/// Score descending, then literal matches, provenance, discovery order.
fn compare_hits(a: &ScoredCandidate, ia: usize, b: &ScoredCandidate, ib: usize) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| b.exact_match.cmp(&a.exact_match))
        .then_with(|| a.provenance.cmp(&b.provenance))
        .then_with(|| ia.cmp(&ib))
}

/// Rank with the default configuration.
pub fn rank<A, P>(
    query: &str,
    accounts: &[A],
    products: &[(A, P)],
    top_k: usize,
) -> Result<Vec<ScoredCandidate>>
where
    A: AsRef<str>,
    P: AsRef<str>,
{
    HybridRanker::default().rank(query, accounts, products, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_PRODUCTS: &[(&str, &str)] = &[];

    #[test]
    fn test_rejects_empty_query() {
        let err = rank("   ", &["maxar"], NO_PRODUCTS, 5).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_zero_top_k() {
        let err = rank("maxar", &["maxar"], NO_PRODUCTS, 0).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[test]
    fn test_exact_before_fuzzy_on_equal_score() {
        let a = ScoredCandidate {
            label: "a".to_string(),
            provenance: Provenance::Product,
            score: 4.0,
            exact_match: false,
        };
        let b = ScoredCandidate {
            exact_match: true,
            ..a.clone()
        };
        assert_eq!(compare_hits(&b, 5, &a, 0), Ordering::Less);
    }

    #[test]
    fn test_account_before_product_on_equal_score() {
        let hits = rank("maxar", &["maxar"], &[("open", "maxar")], 5).unwrap();
        // Account scores 10, product 10 on its primary field: same score, both exact.
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].provenance, Provenance::Account);
        assert_eq!(hits[1].label, "open/maxar");
    }

    #[test]
    fn test_discovery_order_breaks_remaining_ties() {
        let hits = rank("gov", &["gov-b", "gov-a"], NO_PRODUCTS, 5).unwrap();
        let labels: Vec<&str> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["gov-b", "gov-a"]);
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let hits = rank("maxar", &["maxar", "maxar"], NO_PRODUCTS, 5).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_truncates_to_top_k() {
        let accounts = ["data-a", "data-b", "data-c"];
        let hits = rank("data", &accounts, NO_PRODUCTS, 2).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_serializes_without_exact_flag() {
        let hit = ScoredCandidate {
            label: "maxar".to_string(),
            provenance: Provenance::Account,
            score: 10.0,
            exact_match: true,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"label": "maxar", "kind": "account", "score": 10.0})
        );
    }
}
