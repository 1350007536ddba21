//! CSV → 年度別JSON 変換のテスト

use tempfile::tempdir;
use top100_common::convert::REQUIRED_COLUMNS;
use top100_common::Vintage;
use top100_rust::error::Top100Error;
use top100_rust::loader;

fn sample_csv() -> String {
    let header = REQUIRED_COLUMNS.join(",");
    format!(
        "{}\n\
         101,Ridge,Monte Bello,2019,\"Dense, with \"\"iron\"\" notes.\",JL,Red,USA,Santa Cruz Mountains,97,285,,Nov 15 2024,2023,1,,\n\
         102,Billecart-Salmon,Brut Rosé,NV,Fresh.,AN,Blush,France,Champagne,94,110,Magnum,Nov 15 2024,2023,2,,sparkling\n\
         103,Dönnhoff,Riesling,2021,,KM,white,Germany,Nahe,,,,Nov 15 2024,2023,,https://a.imgix.net/r.jpg,\n",
        header
    )
}

#[test]
fn test_convert_then_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("top100-2023.csv");
    std::fs::write(&input, sample_csv()).unwrap();
    let data_dir = dir.path().join("data");
    let output = data_dir.join("wines-2023.json");

    let count = loader::convert_csv(&input, &output).expect("変換失敗");
    assert_eq!(count, 3);
    assert!(output.exists(), "出力ファイルが作成されていません");

    let loaded = loader::load_year(&data_dir, 2023, 2024).expect("読み込み失敗");
    assert!(!loaded.used_fallback());
    assert_eq!(loaded.wines.len(), 3);

    let monte = &loaded.wines[0];
    assert_eq!(monte.id, "101");
    assert_eq!(monte.display_rank, 1);
    assert_eq!(monte.vintage, Some(Vintage::Year(2019)));
    assert_eq!(monte.note.as_deref(), Some("Dense, with \"iron\" notes."));
    assert_eq!(monte.price, Some(285.0));

    let rose = &loaded.wines[1];
    assert_eq!(rose.vintage, Some(Vintage::NonVintage));
    assert_eq!(rose.category.as_deref(), Some("Rosé"));
    assert_eq!(rose.bottle_size.as_deref(), Some("Magnum"));

    let riesling = &loaded.wines[2];
    assert_eq!(riesling.category.as_deref(), Some("White"));
    assert_eq!(riesling.score, None, "空の点数は未設定");
    assert_eq!(riesling.display_rank, 103, "順位が空なら id で補う");
    assert_eq!(riesling.image_url.as_deref(), Some("https://a.imgix.net/r.jpg"));
}

#[test]
fn test_convert_raw_json_shape() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    std::fs::write(&input, sample_csv()).unwrap();

    loader::convert_csv(&input, &output).expect("変換失敗");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], 101);
    assert_eq!(first["vintage"], 2019);
    assert_eq!(first["alternate_bottle_size"], serde_json::Value::Null);
    assert_eq!(first["wine_type"], serde_json::Value::Null);
    assert_eq!(json[1]["vintage"], "NV");
    assert_eq!(json[2]["score"], serde_json::Value::Null);
}

#[test]
fn test_convert_missing_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = loader::convert_csv(&dir.path().join("none.csv"), &dir.path().join("out.json"));
    assert!(matches!(result, Err(Top100Error::Io(_))));
}

#[test]
fn test_convert_bad_header() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("in.csv");
    std::fs::write(&input, "id,name\n1,A\n").unwrap();
    let result = loader::convert_csv(&input, &dir.path().join("out.json"));
    assert!(matches!(result, Err(Top100Error::Common(top100_common::Error::Parse(_)))));
    assert!(!dir.path().join("out.json").exists(), "失敗時は出力しない");
}
