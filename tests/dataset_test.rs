//! 年度別データセット読み込みのテスト

use tempfile::tempdir;
use top100_common::filter::{filter_wines, options_for, Facet, FacetState};
use top100_rust::loader;

const SAMPLE_2023: &str = r#"[
    {"id": 1, "top100_rank": 1, "wine_full": "Cabernet Sauvignon", "winery_full": "Ridge", "color": "Red", "country": "USA", "wine_type": "still", "score": 97, "price": 95},
    {"id": 2, "top100_rank": 2, "wine_full": "Brut Rosé", "winery_full": "Billecart-Salmon", "color": "Blush", "country": "France", "wine_type": "sparkling", "vintage": "NV", "score": "94", "price": "$110"},
    {"id": 3, "top100_rank": 3, "wine_full": "Riesling", "color": "white", "country": "Germany", "wine_type": "still"},
    "garbage"
]"#;

#[test]
fn test_load_year_normalizes() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("wines-2023.json"), SAMPLE_2023).unwrap();

    let loaded = loader::load_year(dir.path(), 2023, 2024).expect("読み込み失敗");
    assert_eq!(loaded.year, 2023);
    assert!(!loaded.used_fallback());
    assert_eq!(loaded.wines.len(), 3, "オブジェクト以外はスキップ");
    assert_eq!(loaded.wines[1].category.as_deref(), Some("Rosé"));
    assert_eq!(loaded.wines[2].category.as_deref(), Some("White"));
    assert_eq!(loaded.wines[1].price, Some(110.0));
}

#[test]
fn test_load_year_falls_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("wines-2024.json"), SAMPLE_2023).unwrap();
    std::fs::write(dir.path().join("wines-2001.json"), "{ broken").unwrap();

    let loaded = loader::load_year(dir.path(), 2001, 2024).expect("代替年度の読み込み失敗");
    assert_eq!(loaded.requested, 2001);
    assert_eq!(loaded.year, 2024);
    assert!(loaded.used_fallback());
}

#[test]
fn test_loaded_year_filters() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("wines-2023.json"), SAMPLE_2023).unwrap();
    let loaded = loader::load_year(dir.path(), 2023, 2024).expect("読み込み失敗");

    let state = FacetState::default().with(Facet::Locale, "France");
    let wines = filter_wines(&loaded.wines, &state);
    assert_eq!(wines.len(), 1);
    assert_eq!(wines[0].id, "2");

    let colors = options_for(Facet::Category, &loaded.wines, &state);
    assert_eq!(colors, vec!["All", "Rosé"]);
}
