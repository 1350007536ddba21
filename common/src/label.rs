//! ラベル画像URLモジュール
//!
//! - ラベル画像が無いワインのための代替ラベルURL生成
//! - 画像配信(imgix)URLへの変換パラメータ付与
//!
//! どちらも失敗しない（不正な入力は元の値を返す）。

use crate::types::{ImageOverrides, Wine};
use regex::Regex;
use url::Url;

/// 代替ラベル画像のベースURL
pub const FALLBACK_LABEL_BASE: &str = "https://mshanken.imgix.net/wso/bolt/wine-detail/details/";

/// 代替ラベル画像の拡張子
pub const FALLBACK_LABEL_EXT: &str = ".png";

/// 画像配信ホストの判定文字列
pub const DELIVERY_HOST_MARKER: &str = "imgix";

/// 配信URLの既定パラメータ（auto / fit / q）
pub const DEFAULT_DELIVERY_PARAMS: [(&str, &str); 3] = [
    ("auto", "format,compress"),
    ("fit", "max"),
    ("q", "50"),
];

lazy_static::lazy_static! {
    static ref SPARKLING_RE: Regex = Regex::new(r"sparkling|champagne").unwrap();
    static ref ROSE_PREFIX_RE: Regex = Regex::new(r"^ros[ée](_|$)").unwrap();
}

/// 色区分とワインタイプから代替ラベルURLを生成
///
/// ワインタイプが空なら色区分から still / sparkling を推定し、
/// `色_タイプ` をキーにする。rosé は rose に揃え、
/// 存在しない組み合わせ（sparkling_sparkling, dessert_dessert）は置き換える。
pub fn fallback_label_url(category: &str, sub_category: &str) -> String {
    let color = category.trim().to_lowercase();
    let raw_type = sub_category.trim().to_lowercase();

    let wine_type = if !raw_type.is_empty() {
        raw_type
    } else if SPARKLING_RE.is_match(&color) {
        "sparkling".to_string()
    } else {
        "still".to_string()
    };

    let key = format!("{}_{}", color, wine_type);
    let key = ROSE_PREFIX_RE.replace(&key, "rose$1").into_owned();

    let key = match key.as_str() {
        "sparkling_sparkling" => "white_sparkling".to_string(),
        "dessert_dessert" => "dessert_still".to_string(),
        _ => key,
    };

    format!("{}{}{}", FALLBACK_LABEL_BASE, key, FALLBACK_LABEL_EXT)
}

/// ワインの表示用ラベルURL（ラベル画像が無ければ代替ラベル）
pub fn label_url(wine: &Wine) -> String {
    match &wine.image_url {
        Some(url) => url.clone(),
        None => fallback_label_url(
            wine.category.as_deref().unwrap_or_default(),
            wine.sub_category.as_deref().unwrap_or_default(),
        ),
    }
}

/// 配信パラメータ（挿入順を保持し、同名キーは後勝ち）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryParams {
    pairs: Vec<(String, String)>,
}

impl DeliveryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既定パラメータ（auto / fit / q）
    pub fn defaults() -> Self {
        let mut params = Self::new();
        for (key, value) in DEFAULT_DELIVERY_PARAMS {
            params.set(key, value);
        }
        params
    }

    /// 幅指定のみ
    pub fn width(w: u32) -> Self {
        let mut params = Self::new();
        params.set("w", w.to_string());
        params
    }

    /// ワインの画像個別指定から生成
    ///
    /// crop が focalpoint で fit が未指定のときは fit=crop を補う。
    pub fn from_overrides(overrides: &ImageOverrides) -> Self {
        let mut params = Self::new();
        let fit = match (&overrides.fit, overrides.crop.as_deref()) {
            (Some(fit), _) => Some(fit.clone()),
            (None, Some("focalpoint")) => Some("crop".to_string()),
            (None, _) => None,
        };
        if let Some(fit) = fit {
            params.set("fit", fit);
        }
        if let Some(ar) = &overrides.aspect_ratio {
            params.set("ar", ar.clone());
        }
        if let Some(crop) = &overrides.crop {
            params.set("crop", crop.clone());
        }
        if let Some(x) = overrides.focal_x {
            params.set("fp-x", x.to_string());
        }
        if let Some(y) = overrides.focal_y {
            params.set("fp-y", y.to_string());
        }
        params
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 別のパラメータで上書き（other が優先）
    pub fn merged_with(&self, other: &DeliveryParams) -> Self {
        let mut merged = self.clone();
        for (key, value) in &other.pairs {
            merged.set(key.clone(), value.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// 配信URLに変換パラメータを付与
///
/// 空文字・解析不能なURL・imgix以外のホストはそのまま返す。
/// 既定パラメータに呼び出し側の指定をマージ（呼び出し側が優先）し、
/// 同名のクエリは置き換える。
pub fn build_delivery_url(url: &str, params: &DeliveryParams) -> String {
    if url.is_empty() {
        return url.to_string();
    }

    let mut parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return url.to_string(),
    };

    let is_delivery_host = parsed
        .host_str()
        .map(|host| host.contains(DELIVERY_HOST_MARKER))
        .unwrap_or(false);
    if !is_delivery_host {
        return url.to_string();
    }

    let final_params = DeliveryParams::defaults().merged_with(params);

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (key, value) in final_params.iter() {
        match pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                pairs[first].1 = value.to_string();
                let mut index = 0;
                pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    parsed.query_pairs_mut().clear().extend_pairs(pairs.iter());
    parsed.to_string()
}

/// ワインの画像個別指定を反映した配信URL
pub fn wine_delivery_url(wine: &Wine, extra: &DeliveryParams) -> String {
    let params = DeliveryParams::from_overrides(&wine.image).merged_with(extra);
    build_delivery_url(&label_url(wine), &params)
}

/// レスポンシブ画像用の srcset 文字列
///
/// `url?w=160 160w, url?w=240 240w` の形式。
pub fn srcset(url: &str, widths: &[u32]) -> String {
    widths
        .iter()
        .map(|w| format!("{} {}w", build_delivery_url(url, &DeliveryParams::width(*w)), w))
        .collect::<Vec<_>>()
        .join(", ")
}

/// ワインの画像個別指定を各幅に反映した srcset
pub fn wine_srcset(wine: &Wine, widths: &[u32]) -> String {
    widths
        .iter()
        .map(|w| format!("{} {}w", wine_delivery_url(wine, &DeliveryParams::width(*w)), w))
        .collect::<Vec<_>>()
        .join(", ")
}
