//! ワイン比較リスト
//!
//! 最大3本までのワインを横並びで比較する。

use crate::label::label_url;
use crate::types::Wine;

/// 比較できる最大本数
pub const MAX_COMPARE: usize = 3;

/// 比較を開始できる最小本数
pub const MIN_COMPARE: usize = 2;

pub const UNKNOWN_REGION: &str = "Unknown Region";
pub const NO_NOTE: &str = "No tasting note available.";

/// トグル結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareToggle {
    Added,
    Removed,
    /// 上限に達しているため追加しなかった
    Full,
}

/// 比較対象のid一覧（追加順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareList {
    ids: Vec<String>,
}

impl CompareList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 含まれていれば外し、なければ追加する
    pub fn toggle(&mut self, id: &str) -> CompareToggle {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            return CompareToggle::Removed;
        }
        if self.ids.len() >= MAX_COMPARE {
            return CompareToggle::Full;
        }
        self.ids.push(id.to_string());
        CompareToggle::Added
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|x| x != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 空き枠の数
    pub fn open_slots(&self) -> usize {
        MAX_COMPARE - self.ids.len()
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    /// 指定年度のワインを追加順で取得（存在しないidは飛ばす）
    pub fn wines<'a>(&self, items: &'a [Wine]) -> Vec<&'a Wine> {
        self.ids
            .iter()
            .filter_map(|id| items.iter().find(|w| w.id == *id))
            .collect()
    }
}

/// 比較表の1列
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonColumn {
    pub id: String,
    pub name: String,
    pub producer: String,
    pub image_url: String,
    pub rank: u32,
    pub score: u32,
    pub price: f64,
    pub category: String,
    pub vintage: String,
    pub region: String,
    pub country: String,
    pub note: String,
}

/// 比較表の列を生成
pub fn comparison_columns(wines: &[&Wine]) -> Vec<ComparisonColumn> {
    wines
        .iter()
        .map(|wine| ComparisonColumn {
            id: wine.id.clone(),
            name: wine.name.clone(),
            producer: wine.producer_name.clone().unwrap_or_default(),
            image_url: label_url(wine),
            rank: wine.display_rank,
            score: wine.score_or_zero(),
            price: wine.price.unwrap_or(0.0),
            category: wine.category.clone().unwrap_or_default(),
            vintage: wine.vintage.map(|v| v.to_string()).unwrap_or_default(),
            region: wine
                .region
                .clone()
                .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
            country: wine.locale.clone().unwrap_or_default(),
            note: wine.note.clone().unwrap_or_else(|| NO_NOTE.to_string()),
        })
        .collect()
}
