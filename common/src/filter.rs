//! ファセット絞り込みモジュール
//!
//! - フリーテキスト検索・色区分・国・ワインタイプの AND 絞り込み
//! - 他ファセットの選択だけで絞った候補から、各ファセットの選択肢を再計算
//!
//! 数百件規模なので、選択肢は毎回ゼロから計算する。

use crate::types::{Category, Wine};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// 「制約なし」を表す選択肢
pub const ALL: &str = "All";

/// 色区分の優先表示順
pub const PREFERRED_CATEGORY_ORDER: [&str; 3] = ["Red", "White", "Rosé"];

/// ファセットの選択状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacetState {
    pub search: String,
    pub category: String,
    pub locale: String,
    pub sub_category: String,
}

impl Default for FacetState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            locale: ALL.to_string(),
            sub_category: ALL.to_string(),
        }
    }
}

impl FacetState {
    /// すべて制約なしか
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.category == ALL
            && self.locale == ALL
            && self.sub_category == ALL
    }

    /// 指定ファセットの値を更新した新しい状態
    pub fn with(&self, facet: Facet, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match facet {
            Facet::Category => next.category = value,
            Facet::Locale => next.locale = value,
            Facet::SubCategory => next.sub_category = value,
        }
        next
    }

    /// 指定ファセットの選択値
    pub fn selected(&self, facet: Facet) -> &str {
        match facet {
            Facet::Category => &self.category,
            Facet::Locale => &self.locale,
            Facet::SubCategory => &self.sub_category,
        }
    }
}

/// 選択肢を持つファセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    Locale,
    SubCategory,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Category, Facet::SubCategory, Facet::Locale];

    /// ワインの該当フィールド
    pub fn value_of<'a>(&self, wine: &'a Wine) -> Option<&'a str> {
        match self {
            Facet::Category => wine.category.as_deref(),
            Facet::Locale => wine.locale.as_deref(),
            Facet::SubCategory => wine.sub_category.as_deref(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Category => "Wine Color",
            Facet::Locale => "Country",
            Facet::SubCategory => "Wine Type",
        }
    }
}

impl std::str::FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" | "color" => Ok(Facet::Category),
            "locale" | "country" => Ok(Facet::Locale),
            "sub-category" | "subcategory" | "wine-type" | "type" => Ok(Facet::SubCategory),
            _ => Err(format!("Unknown facet: {}. Use color, country, or wine-type", s)),
        }
    }
}

/// 検索語にマッチするか（ワイン名・生産者名の部分一致、大文字小文字無視）
fn matches_search(wine: &Wine, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if wine.name.to_lowercase().contains(needle_lower) {
        return true;
    }
    wine.producer_name
        .as_deref()
        .map(|p| p.to_lowercase().contains(needle_lower))
        .unwrap_or(false)
}

fn matches_facet(wine: &Wine, state: &FacetState, facet: Facet) -> bool {
    let selected = state.selected(facet);
    selected == ALL || facet.value_of(wine) == Some(selected)
}

/// 指定ファセットを除いた条件でマッチするか
fn matches_except(wine: &Wine, state: &FacetState, needle_lower: &str, skip: Option<Facet>) -> bool {
    matches_search(wine, needle_lower)
        && Facet::ALL
            .iter()
            .filter(|f| Some(**f) != skip)
            .all(|f| matches_facet(wine, state, *f))
}

/// 絞り込み（入力順を保持）
pub fn filter_wines<'a>(items: &'a [Wine], state: &FacetState) -> Vec<&'a Wine> {
    let needle = state.search.to_lowercase();
    items
        .iter()
        .filter(|w| matches_except(w, state, &needle, None))
        .collect()
}

/// ファセットの選択肢を計算
///
/// 自分自身の選択は無視し、他のファセット（検索語を含む）で絞った候補から
/// 空でない値を重複なく集める。先頭は常に "All"。
pub fn options_for(facet: Facet, items: &[Wine], state: &FacetState) -> Vec<String> {
    let needle = state.search.to_lowercase();
    let mut values: Vec<String> = Vec::new();
    for wine in items.iter().filter(|w| matches_except(w, state, &needle, Some(facet))) {
        if let Some(value) = facet.value_of(wine) {
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
    }

    match facet {
        Facet::Category => sort_categories(&mut values),
        Facet::Locale => values.sort_by(|a, b| compare_text(a, b)),
        Facet::SubCategory => sort_sub_categories(&mut values),
    }

    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(ALL.to_string());
    options.extend(values);
    options
}

/// すべてのファセットの選択肢
pub fn all_options(items: &[Wine], state: &FacetState) -> HashMap<Facet, Vec<String>> {
    Facet::ALL
        .iter()
        .map(|f| (*f, options_for(*f, items, state)))
        .collect()
}

/// 大文字小文字を無視した比較（同順なら元の文字列で比較）
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_categories(values: &mut Vec<String>) {
    let mut ordered: Vec<String> = PREFERRED_CATEGORY_ORDER
        .iter()
        .filter(|c| values.iter().any(|v| v == *c))
        .map(|c| c.to_string())
        .collect();
    let mut rest: Vec<String> = values
        .iter()
        .filter(|v| !PREFERRED_CATEGORY_ORDER.contains(&v.as_str()))
        .cloned()
        .collect();
    rest.sort_by(|a, b| compare_text(a, b));
    ordered.extend(rest);
    *values = ordered;
}

fn sub_category_priority(value: &str) -> u8 {
    match value.to_lowercase().as_str() {
        "still" => 0,
        "sparkling" => 1,
        _ => 2,
    }
}

fn sort_sub_categories(values: &mut [String]) {
    values.sort_by(|a, b| {
        sub_category_priority(a)
            .cmp(&sub_category_priority(b))
            .then_with(|| {
                let al = a.to_lowercase().replace('_', " ");
                let bl = b.to_lowercase().replace('_', " ");
                compare_text(&al, &bl)
            })
    });
}

/// ワインタイプの表示名（late_harvest → Late Harvest、Rose → Rosé）
pub fn humanize_sub_category(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    value
        .to_lowercase()
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            let titled = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };
            if titled == "Rose" {
                Category::Rose.as_str().to_string()
            } else {
                titled
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 一覧の並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Rank,
    Score,
    PriceLow,
    PriceHigh,
    Name,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rank" => Ok(SortOrder::Rank),
            "score" => Ok(SortOrder::Score),
            "price" | "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "name" => Ok(SortOrder::Name),
            _ => Err(format!(
                "Unknown sort: {}. Use rank, score, price-low, price-high, or name",
                s
            )),
        }
    }
}

/// 並べ替え（安定ソート、価格未設定は末尾）
pub fn sort_wines(wines: &mut [&Wine], order: SortOrder) {
    match order {
        SortOrder::Rank => wines.sort_by_key(|w| w.display_rank),
        SortOrder::Score => wines.sort_by(|a, b| {
            b.score_or_zero()
                .cmp(&a.score_or_zero())
                .then(a.display_rank.cmp(&b.display_rank))
        }),
        SortOrder::PriceLow => wines.sort_by(|a, b| compare_price(a.price, b.price, false)),
        SortOrder::PriceHigh => wines.sort_by(|a, b| compare_price(a.price, b.price, true)),
        SortOrder::Name => wines.sort_by(|a, b| compare_text(&a.name, &b.name)),
    }
}

/// 一覧の表示形式（カードのグリッド / 1行ずつの詰めたリスト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::List => "List",
        }
    }

    /// 一覧コンテナのCSSクラス
    pub fn container_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "wine-grid",
            ViewMode::List => "wine-list-condensed",
        }
    }

    /// カードのCSSクラス（色区分クラスは呼び出し側で付ける）
    pub fn card_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "wine-card",
            ViewMode::List => "wine-card-condensed",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" | "condensed" => Ok(ViewMode::List),
            _ => Err(format!("Unknown view: {}. Use grid or list", s)),
        }
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
