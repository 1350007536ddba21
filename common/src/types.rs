//! ワインデータの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RawWine: 年度別JSONの生レコード（型が揺れるため全フィールドをValueで受ける）
//! - Wine: 正規化後のレコード
//! - Category / Vintage: 色区分とヴィンテージ

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// 年度別データの生レコード
///
/// 数値が文字列で来たり、ヴィンテージが "NV" だったりするため、
/// ここでは型を決めずに受け取り、正規化時に変換する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWine {
    pub id: Option<Value>,
    pub top100_rank: Option<Value>,
    pub wine_full: Option<Value>,
    pub winery_full: Option<Value>,
    pub vintage: Option<Value>,
    pub color: Option<Value>,
    pub wine_type: Option<Value>,
    pub country: Option<Value>,
    pub region: Option<Value>,
    pub price: Option<Value>,
    pub score: Option<Value>,
    pub label_url: Option<Value>,
    pub note: Option<Value>,
    pub taster_initials: Option<Value>,
    pub issue_date: Option<Value>,
    pub alternate_bottle_size: Option<Value>,
    pub top100_year: Option<Value>,
    pub image_fit: Option<Value>,
    pub image_ar: Option<Value>,
    pub image_crop: Option<Value>,
    pub image_fp_x: Option<Value>,
    pub image_fp_y: Option<Value>,
}

/// 正規化済みのワイン
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wine {
    /// データセット上の識別子（文字列形式）。正規化で書き換えない
    pub id: String,
    /// 表示順位（top100_rank、なければidの数値）
    pub display_rank: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vintage: Option<Vintage>,
    /// 色区分（正規化済み、未知の値はそのまま）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// ワインタイプ（still / sparkling など、小文字）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// 国
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taster_initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottle_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "ImageOverrides::is_empty")]
    pub image: ImageOverrides,
}

impl Wine {
    /// 表示用スコア（未設定は0）
    pub fn score_or_zero(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    /// 生産者名とワイン名を連結した表示名
    pub fn full_label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(producer) = &self.producer_name {
            parts.push(producer.clone());
        }
        parts.push(self.name.clone());
        if let Some(vintage) = &self.vintage {
            parts.push(vintage.to_string());
        }
        parts.join(" ")
    }
}

/// 画像配信の個別指定（fit / ar / crop / focal point）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_y: Option<f64>,
}

impl ImageOverrides {
    pub fn is_empty(&self) -> bool {
        self.fit.is_none()
            && self.aspect_ratio.is_none()
            && self.crop.is_none()
            && self.focal_x.is_none()
            && self.focal_y.is_none()
    }
}

/// ヴィンテージ（年 または ノンヴィンテージ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vintage {
    Year(i32),
    NonVintage,
}

impl Vintage {
    pub fn year(&self) -> Option<i32> {
        match self {
            Vintage::Year(y) => Some(*y),
            Vintage::NonVintage => None,
        }
    }
}

impl fmt::Display for Vintage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vintage::Year(y) => write!(f, "{}", y),
            Vintage::NonVintage => write!(f, "NV"),
        }
    }
}

impl Serialize for Vintage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Vintage::Year(y) => serializer.serialize_i32(*y),
            Vintage::NonVintage => serializer.serialize_str("NV"),
        }
    }
}

/// 色区分の正規カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Red,
    White,
    Rose,
    Sparkling,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Red,
        Category::White,
        Category::Rose,
        Category::Sparkling,
        Category::Dessert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Red => "Red",
            Category::White => "White",
            Category::Rose => "Rosé",
            Category::Sparkling => "Sparkling",
            Category::Dessert => "Dessert",
        }
    }

    /// 部分一致ルールで正規カテゴリを判定（先勝ち）
    ///
    /// blush/rose/rosé → Red → White → Sparkling/Champagne → Dessert の順。
    /// どれにも当たらなければ None。
    pub fn canonicalize(raw: &str) -> Option<Category> {
        let lower = raw.to_lowercase();
        if lower.contains("blush") || lower.contains("rose") || lower.contains("rosé") {
            Some(Category::Rose)
        } else if lower.contains("red") {
            Some(Category::Red)
        } else if lower.contains("white") {
            Some(Category::White)
        } else if lower.contains("sparkling") || lower.contains("champagne") {
            Some(Category::Sparkling)
        } else if lower.contains("dessert") {
            Some(Category::Dessert)
        } else {
            None
        }
    }

    /// カード表示用のCSSクラス
    pub fn css_class(category: Option<&str>) -> &'static str {
        match category.and_then(Category::canonicalize) {
            Some(Category::Red) => "type-red",
            Some(Category::White) => "type-white",
            Some(Category::Rose) => "type-rose",
            Some(Category::Sparkling) => "type-sparkling",
            Some(Category::Dessert) => "type-dessert",
            None => "type-default",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_wine_deserialize_mixed_types() {
        let json = r#"{
            "id": 7,
            "wine_full": "Cabernet Sauvignon Napa Valley",
            "vintage": "NV",
            "score": "95",
            "price": 85
        }"#;

        let raw: RawWine = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(raw.id, Some(Value::from(7)));
        assert_eq!(raw.vintage, Some(Value::from("NV")));
        assert_eq!(raw.score, Some(Value::from("95")));
        assert!(raw.color.is_none());
    }

    #[test]
    fn test_raw_wine_deserialize_empty_object() {
        let raw: RawWine = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert!(raw.id.is_none());
        assert!(raw.wine_full.is_none());
    }

    #[test]
    fn test_vintage_serialize() {
        assert_eq!(serde_json::to_string(&Vintage::Year(2019)).unwrap(), "2019");
        assert_eq!(serde_json::to_string(&Vintage::NonVintage).unwrap(), "\"NV\"");
    }

    #[test]
    fn test_category_canonicalize() {
        assert_eq!(Category::canonicalize("Red"), Some(Category::Red));
        assert_eq!(Category::canonicalize("Blush"), Some(Category::Rose));
        assert_eq!(Category::canonicalize("ROSÉ"), Some(Category::Rose));
        assert_eq!(Category::canonicalize("Champagne"), Some(Category::Sparkling));
        assert_eq!(Category::canonicalize("Fortified"), None);
    }

    #[test]
    fn test_category_css_class() {
        assert_eq!(Category::css_class(Some("Rosé")), "type-rose");
        assert_eq!(Category::css_class(Some("Orange")), "type-default");
        assert_eq!(Category::css_class(None), "type-default");
    }

    #[test]
    fn test_wine_full_label() {
        let wine = Wine {
            name: "Barolo".to_string(),
            producer_name: Some("G. Conterno".to_string()),
            vintage: Some(Vintage::Year(2016)),
            ..Default::default()
        };
        assert_eq!(wine.full_label(), "G. Conterno Barolo 2016");
    }

    #[test]
    fn test_wine_serialize_skips_absent() {
        let wine = Wine {
            id: "1".to_string(),
            display_rank: 1,
            name: "Test".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&wine).expect("シリアライズ失敗");
        assert!(json.contains("\"id\":\"1\""));
        assert!(!json.contains("price"));
        assert!(!json.contains("image"));
    }
}
