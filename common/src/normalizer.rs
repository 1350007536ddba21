//! データセット正規化モジュール
//!
//! 年度別JSONの生レコードを Wine に変換する。
//! 色区分だけを正規カテゴリに書き換え、その他のフィールドは軽い型変換のみ。
//! 不正なレコードがあってもバッチ全体は失敗させない。

use crate::error::{Error, Result};
use crate::types::{Category, ImageOverrides, RawWine, Vintage, Wine};
use serde_json::Value;
use tracing::{debug, warn};

/// name が無いレコードに使う代替名
pub const UNNAMED: &str = "Unnamed";

/// ヴィンテージとして受け付ける年の範囲
const MIN_VINTAGE: i32 = 1000;
const MAX_VINTAGE: i32 = 9999;

/// JSON配列文字列を生レコードに変換
///
/// オブジェクト以外の要素はスキップする（警告ログのみ）。
/// 配列として読めない場合だけエラー。
pub fn parse_dataset(json: &str) -> Result<Vec<RawWine>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(raw_from_values(values))
}

/// Value配列から生レコードを取り出す
pub fn raw_from_values(values: Vec<Value>) -> Vec<RawWine> {
    let mut raws = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!(index, "オブジェクトでないレコードをスキップ");
            continue;
        }
        match serde_json::from_value::<RawWine>(value) {
            Ok(raw) => raws.push(raw),
            Err(e) => warn!(index, error = %e, "レコードを読み込めないためスキップ"),
        }
    }
    raws
}

/// JSON文字列を読み込んで正規化まで行う
pub fn load_wines(json: &str) -> Result<Vec<Wine>> {
    let raws = parse_dataset(json).map_err(|e| match e {
        Error::Json(inner) => Error::Parse(format!("データセットが配列ではありません: {}", inner)),
        other => other,
    })?;
    Ok(normalize(&raws))
}

/// 生レコードを正規化する
///
/// 色区分は [`canonical_category`] のルールで書き換え、
/// それ以外は型変換のみ。id は書き換えない。
pub fn normalize(raw_items: &[RawWine]) -> Vec<Wine> {
    raw_items.iter().map(normalize_one).collect()
}

fn normalize_one(raw: &RawWine) -> Wine {
    let id = text(&raw.id).unwrap_or_default();

    let name = text(&raw.wine_full).unwrap_or_else(|| {
        debug!(id = %id, "ワイン名が無いため代替名を使用");
        UNNAMED.to_string()
    });

    let display_rank = positive_int(&raw.top100_rank)
        .filter(|rank| *rank > 0)
        .or_else(|| id.trim().parse::<u32>().ok().filter(|rank| *rank > 0))
        .unwrap_or(0);

    Wine {
        display_rank,
        name,
        producer_name: text(&raw.winery_full),
        vintage: vintage(&raw.vintage),
        category: text(&raw.color).map(|c| canonical_category(&c)),
        sub_category: text(&raw.wine_type).map(|t| t.to_lowercase()),
        locale: text(&raw.country),
        region: text(&raw.region),
        price: number(&raw.price).filter(|p| *p >= 0.0),
        score: positive_int(&raw.score),
        image_url: text(&raw.label_url),
        note: text(&raw.note),
        taster_initials: text(&raw.taster_initials),
        issue_date: text(&raw.issue_date),
        bottle_size: text(&raw.alternate_bottle_size),
        year: number(&raw.top100_year).map(|y| y as i32),
        image: ImageOverrides {
            fit: text(&raw.image_fit),
            aspect_ratio: text(&raw.image_ar),
            crop: text(&raw.image_crop),
            focal_x: number(&raw.image_fp_x),
            focal_y: number(&raw.image_fp_y),
        },
        id,
    }
}

/// 色区分を正規化（該当なしは元の値のまま）
pub fn canonical_category(raw: &str) -> String {
    match Category::canonicalize(raw) {
        Some(category) => category.as_str().to_string(),
        None => raw.to_string(),
    }
}

/// 文字列化（空文字・null は None）
fn text(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 数値化（数値文字列も受け付ける）
fn number(value: &Option<Value>) -> Option<f64> {
    let parsed = match value.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn positive_int(value: &Option<Value>) -> Option<u32> {
    number(value)
        .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.round() as u32)
}

fn vintage(value: &Option<Value>) -> Option<Vintage> {
    let label = text(value)?;
    if label.eq_ignore_ascii_case("nv") {
        return Some(Vintage::NonVintage);
    }
    let year = label.parse::<i32>().ok().or_else(|| {
        label
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < 1e6)
            .map(|y| y as i32)
    });
    match year {
        Some(year) if (MIN_VINTAGE..=MAX_VINTAGE).contains(&year) => Some(Vintage::Year(year)),
        _ => {
            debug!(vintage = %label, "ヴィンテージとして解釈できないため未設定");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawWine {
        serde_json::from_value(value).expect("テストデータ不正")
    }

    #[test]
    fn test_rose_variants_normalize() {
        for color in ["Rosé", "rose", "ROSÉ", "Blush", "Sparkling Rosé", "rosé wine"] {
            let wines = normalize(&[raw(json!({"id": 1, "wine_full": "X", "color": color}))]);
            assert_eq!(wines[0].category.as_deref(), Some("Rosé"), "入力: {}", color);
        }
    }

    #[test]
    fn test_category_rules_order() {
        let cases = [
            ("red", "Red"),
            ("White", "White"),
            ("Champagne", "Sparkling"),
            ("sparkling", "Sparkling"),
            ("Dessert", "Dessert"),
            ("Sweet Red", "Red"),
        ];
        for (input, expected) in cases {
            assert_eq!(canonical_category(input), expected, "入力: {}", input);
        }
    }

    #[test]
    fn test_unknown_category_passes_through() {
        let wines = normalize(&[raw(json!({"id": 1, "wine_full": "X", "color": "Orange"}))]);
        assert_eq!(wines[0].category.as_deref(), Some("Orange"));

        let wines = normalize(&[raw(json!({"id": 2, "wine_full": "Y"}))]);
        assert_eq!(wines[0].category, None);
    }

    #[test]
    fn test_missing_name_uses_default() {
        let wines = normalize(&[
            raw(json!({"id": 1})),
            raw(json!({"id": 2, "wine_full": "Second"})),
        ]);
        assert_eq!(wines.len(), 2);
        assert_eq!(wines[0].name, UNNAMED);
        assert_eq!(wines[1].name, "Second");
    }

    #[test]
    fn test_id_is_kept_and_rank_falls_back() {
        let wines = normalize(&[
            raw(json!({"id": 42, "top100_rank": 3, "wine_full": "A"})),
            raw(json!({"id": "17", "wine_full": "B"})),
            raw(json!({"id": "abc", "wine_full": "C"})),
        ]);
        assert_eq!(wines[0].id, "42");
        assert_eq!(wines[0].display_rank, 3);
        assert_eq!(wines[1].display_rank, 17);
        assert_eq!(wines[2].id, "abc");
        assert_eq!(wines[2].display_rank, 0);
    }

    #[test]
    fn test_numeric_coercion() {
        let wines = normalize(&[raw(json!({
            "id": 1,
            "wine_full": "A",
            "score": "96",
            "price": "$120",
            "vintage": "2019"
        }))]);
        assert_eq!(wines[0].score, Some(96));
        assert_eq!(wines[0].price, Some(120.0));
        assert_eq!(wines[0].vintage, Some(Vintage::Year(2019)));
    }

    #[test]
    fn test_absent_price_is_not_zero() {
        let wines = normalize(&[
            raw(json!({"id": 1, "wine_full": "A", "price": null, "score": "n/a"})),
            raw(json!({"id": 2, "wine_full": "B", "price": 0})),
        ]);
        assert_eq!(wines[0].price, None);
        assert_eq!(wines[0].score, None);
        assert_eq!(wines[0].score_or_zero(), 0);
        assert_eq!(wines[1].price, Some(0.0));
    }

    #[test]
    fn test_zero_rank_falls_back_to_id() {
        let wines = normalize(&[
            raw(json!({"id": 42, "top100_rank": 0, "wine_full": "A"})),
            raw(json!({"id": "0", "top100_rank": 0, "wine_full": "B"})),
        ]);
        assert_eq!(wines[0].display_rank, 42, "順位0はidで補う");
        assert_eq!(wines[1].display_rank, 0);
    }

    #[test]
    fn test_garbage_vintage_is_absent() {
        for label in ["NaN", "inf", "-inf", "1e12", "abc", "20.5", "-3"] {
            let wines = normalize(&[raw(json!({"id": 1, "wine_full": "A", "vintage": label}))]);
            assert_eq!(wines[0].vintage, None, "入力: {}", label);
        }
        let wines = normalize(&[raw(json!({"id": 1, "wine_full": "A", "vintage": 2015}))]);
        assert_eq!(wines[0].vintage, Some(Vintage::Year(2015)));
    }

    #[test]
    fn test_non_vintage() {
        let wines = normalize(&[raw(json!({"id": 1, "wine_full": "Brut", "vintage": "NV"}))]);
        assert_eq!(wines[0].vintage, Some(Vintage::NonVintage));
    }

    #[test]
    fn test_sub_category_lowercased() {
        let wines = normalize(&[raw(json!({"id": 1, "wine_full": "A", "wine_type": "Sparkling"}))]);
        assert_eq!(wines[0].sub_category.as_deref(), Some("sparkling"));
    }

    #[test]
    fn test_parse_dataset_skips_non_objects() {
        let json = r#"[{"id": 1, "wine_full": "A"}, 5, "x", null, {"id": 2}]"#;
        let raws = parse_dataset(json).expect("パース失敗");
        assert_eq!(raws.len(), 2);
    }

    #[test]
    fn test_load_wines_rejects_non_array() {
        let result = load_wines(r#"{"id": 1}"#);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_image_overrides_read() {
        let wines = normalize(&[raw(json!({
            "id": 1,
            "wine_full": "A",
            "image_crop": "focalpoint",
            "image_fp_x": 0.4,
            "image_fp_y": "0.6"
        }))]);
        assert_eq!(wines[0].image.crop.as_deref(), Some("focalpoint"));
        assert_eq!(wines[0].image.focal_x, Some(0.4));
        assert_eq!(wines[0].image.focal_y, Some(0.6));
        assert!(wines[0].image.fit.is_none());
    }
}
