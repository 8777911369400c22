//! The catalog facade end to end.

use std::io::Write;

use chrono::{TimeZone, Utc};
use coop_catalog::{
    Catalog, CatalogConfig, CatalogError, ListingRecord, ProductRecord, ProductSource,
    SearchField,
};
use pretty_assertions::assert_eq;

fn record(key: &str, size: u64) -> ListingRecord {
    ListingRecord::new(key, size, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
}

fn listing() -> Vec<ListingRecord> {
    vec![
        record("harvard-lil/gov-data/", 0),
        record("harvard-lil/gov-data/README.md", 2048),
        record("harvard-lil/gov-data/data/0.csv", 1024),
        record("harvard-lil/gov-data/data/1.csv", 1024),
        record("harvard-lil/gov-data/data/2.csv", 1024),
        record("harvard-lil/other/ignored.txt", 7),
    ]
}

#[test]
fn test_compact_listing_under_prefix() {
    let catalog = Catalog::with_defaults();
    let listing = catalog
        .compact_listing(&listing(), "harvard-lil/gov-data/")
        .unwrap();

    assert_eq!(
        listing.tree,
        [
            "harvard-lil/gov-data/",
            "  data/",
            "    [0-2].csv (3 files, 1.0 KB–1.0 KB, total: 3.0 KB)",
            "  README.md (2.0 KB)",
        ]
        .join("\n")
    );
    assert_eq!(listing.stats.total_files, 4);
    assert_eq!(listing.stats.total_directories, 1);
    assert_eq!(listing.stats.total_size, 5120);
    assert_eq!(listing.stats.total_size_human, "5.0 KB");
    assert!(!listing.stats.truncated);
}

#[test]
fn test_configured_root_label_wins() {
    let config = CatalogConfig::from_toml_str(
        "[listing]\nroot_label = \"s3://bucket/harvard-lil/gov-data/\"\nmax_files = 2\n",
    )
    .unwrap();
    let catalog = Catalog::new(config).unwrap();
    let listing = catalog
        .compact_listing(&listing(), "harvard-lil/gov-data/")
        .unwrap();
    assert!(listing.tree.starts_with("s3://bucket/harvard-lil/gov-data/\n"));
    assert!(listing.stats.truncated);
    assert_eq!(listing.stats.total_files, 2);
}

#[test]
fn test_readme_lookup() {
    let catalog = Catalog::with_defaults();
    let readme = catalog.readme(&listing(), "harvard-lil/gov-data/").unwrap();
    assert_eq!(readme.key, "README.md");
    assert_eq!(catalog.readme(&listing(), "harvard-lil/other/"), None);
}

#[test]
fn test_search_json_projection() {
    let catalog = Catalog::with_defaults();
    let accounts = vec!["harvard-lil".to_string(), "maxar".to_string()];
    let products = vec![("harvard-lil".to_string(), "gov-data".to_string())];
    let json = catalog
        .search_json("harvard", &accounts, &products, None)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["label"], "harvard-lil");
    assert_eq!(records[0]["kind"], "account");
    assert_eq!(records[1]["label"], "harvard-lil/gov-data");
    assert_eq!(records[1]["kind"], "product");
    assert!(records[0].get("exact_match").is_none());
}

#[test]
fn test_blend_and_search_products() {
    let catalog = Catalog::with_defaults();
    let api = vec![
        ProductRecord::published("noaa", "climate-normals")
            .with_title("Climate Normals")
            .with_featured(true),
    ];
    let storage = vec![
        ProductRecord::discovered("noaa", "climate-normals"),
        ProductRecord::discovered("noaa", "climate-drafts"),
        ProductRecord::discovered("maxar", "climate-imagery"),
    ];
    let blended = catalog.blend(api, storage);
    assert_eq!(blended.len(), 3);
    assert_eq!(blended[0].source, ProductSource::Api);

    let hits = catalog
        .search_products("climate", &blended, Some("noaa"), &[SearchField::ProductId])
        .unwrap();
    let ids: Vec<&str> = hits.iter().map(|m| m.product.product_id.as_str()).collect();
    assert_eq!(ids, vec!["climate-normals", "climate-drafts"]);

    let all = catalog
        .search_products("climate", &blended, None, &[])
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[search]\nfuzzy_threshold = 0.8\ndefault_top_k = 3").unwrap();

    let config = CatalogConfig::load(file.path()).unwrap();
    assert_eq!(config.search.fuzzy_threshold, 0.8);
    assert_eq!(config.search.default_top_k, 3);
    assert_eq!(config.listing.max_files, 1000);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogConfig::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}
