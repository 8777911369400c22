//! Ranking behaviour across both candidate pools.

use coop_search::{
    HybridRanker, Provenance, ScoredCandidate, SearchConfig, SearchError, rank, relevance,
};
use pretty_assertions::assert_eq;

fn accounts() -> Vec<String> {
    vec!["harvard-lil".to_string(), "maxar".to_string()]
}

fn products() -> Vec<(String, String)> {
    vec![("harvard-lil".to_string(), "gov-data".to_string())]
}

#[test]
fn test_account_query_surfaces_its_products() {
    let hits = rank("harvard", &accounts(), &products(), 5).unwrap();

    let labels: Vec<(&str, Provenance)> = hits
        .iter()
        .map(|h| (h.label.as_str(), h.provenance))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("harvard-lil", Provenance::Account),
            ("harvard-lil/gov-data", Provenance::Product),
        ]
    );
    assert!(hits[0].score >= hits[1].score);
    assert!(hits.iter().all(|h| h.exact_match));
}

#[test]
fn test_no_zero_score_padding() {
    let hits = rank("harvard", &accounts(), &products(), 5).unwrap();
    assert!(hits.len() <= 2);
    assert!(hits.iter().all(|h| h.score > 0.0));

    let none = rank("zzzz", &accounts(), &products(), 5).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_ranking_is_repeatable() {
    let accounts: Vec<String> = ["data-a", "data-b", "open-data", "dataset"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let products: Vec<(String, String)> = vec![
        ("data-a".to_string(), "data".to_string()),
        ("data-b".to_string(), "data".to_string()),
    ];
    let first = rank("data", &accounts, &products, 10).unwrap();
    let second = rank("data", &accounts, &products, 10).unwrap();
    assert_eq!(first, second);
    // Exact product-id matches score 10 and lead, in discovery order.
    assert_eq!(first[0].label, "data-a/data");
    assert_eq!(first[1].label, "data-b/data");
}

#[test]
fn test_fuzzy_query_finds_misspelt_account() {
    let accounts = vec!["overture-maps".to_string(), "maxar".to_string()];
    let products: Vec<(String, String)> = Vec::new();
    let hits = rank("overtrue", &accounts, &products, 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label, "overture-maps");
    assert!(!hits[0].exact_match);
}

#[test]
fn test_invalid_arguments() {
    let products: Vec<(String, String)> = Vec::new();
    assert!(matches!(
        rank("", &accounts(), &products, 5),
        Err(SearchError::InvalidArgument(_))
    ));
    assert!(matches!(
        rank("maxar", &accounts(), &products, 0),
        Err(SearchError::InvalidArgument(_))
    ));
}

#[test]
fn test_configured_threshold() {
    let ranker = HybridRanker::new(&SearchConfig::default().with_fuzzy_threshold(0.99));
    let products: Vec<(String, String)> = Vec::new();
    let hits = ranker
        .rank("overtrue", &["overture-maps".to_string()], &products, 5)
        .unwrap();
    assert_eq!(hits, Vec::<ScoredCandidate>::new());
}

#[test]
fn test_relevance_excludes_unrelated_fields() {
    assert_eq!(relevance("maxar", &["harvard-lil", "gov-data"]), 0.0);
}
