//! テイスティング記録（セレクションセット）モジュール
//!
//! ワインid → ステータス（tasted / want）のマップを管理する。
//! - 変更は新しいマップを返す純粋関数
//! - 年度を切り替えても記録は消さず、表示・出力時に現在の年度のidと突き合わせる
//! - 永続化は KeyValueStore に1キーのJSONとして保存（変更のたびに全体を書き込み）

use crate::error::Result;
use crate::types::{Vintage, Wine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// 永続化に使うキー
pub const STORAGE_KEY: &str = "tastingRecord";

/// 出力列（この順で並ぶ）
pub const EXPORT_COLUMNS: [&str; 10] = [
    "Rank", "Wine", "Winery", "Vintage", "Color", "Region", "Country", "Status", "Score", "Price",
];

/// テイスティングステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TastingStatus {
    Tasted,
    Want,
}

impl TastingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TastingStatus::Tasted => "tasted",
            TastingStatus::Want => "want",
        }
    }

    /// 出力用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            TastingStatus::Tasted => "Tasted",
            TastingStatus::Want => "Want to Taste",
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "tasted" => Some(TastingStatus::Tasted),
            "want" => Some(TastingStatus::Want),
            _ => None,
        }
    }
}

impl std::str::FromStr for TastingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tasted" => Ok(TastingStatus::Tasted),
            "want" | "want-to-taste" => Ok(TastingStatus::Want),
            _ => Err(format!("Unknown status: {}. Use tasted or want", s)),
        }
    }
}

impl std::fmt::Display for TastingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ワインid → ステータス のマップ
///
/// キーは常にidの文字列形式。ステータスが無いidはキー自体を持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    entries: BTreeMap<String, TastingStatus>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みJSONから復元
    ///
    /// JSONとして読めない・オブジェクトでない場合は空のマップ。
    /// 未知のステータスを持つエントリだけは個別に捨てる。
    pub fn from_json(json: &str) -> Self {
        let map = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("テイスティング記録がオブジェクトではないため空で開始");
                return Self::new();
            }
            Err(e) => {
                warn!(error = %e, "テイスティング記録を読み込めないため空で開始");
                return Self::new();
            }
        };

        let mut entries = BTreeMap::new();
        for (id, value) in map {
            match TastingStatus::from_value(&value) {
                Some(status) => {
                    entries.insert(id, status);
                }
                None => debug!(id = %id, "未知のステータスを破棄"),
            }
        }
        Self { entries }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// ステータスを設定した新しいマップ（None は削除）
    pub fn set_status(&self, id: &str, status: Option<TastingStatus>) -> Self {
        let mut next = self.clone();
        next.apply(id, status);
        next
    }

    fn apply(&mut self, id: &str, status: Option<TastingStatus>) {
        match status {
            Some(status) => {
                self.entries.insert(id.to_string(), status);
            }
            None => {
                self.entries.remove(id);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<TastingStatus> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TastingStatus)> {
        self.entries.iter().map(|(id, status)| (id.as_str(), *status))
    }

    /// 指定した年度のワインに存在するidだけを残したマップ
    pub fn retain_known(&self, items: &[Wine]) -> Self {
        let known: HashSet<&str> = items.iter().map(|w| w.id.as_str()).collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(id, _)| known.contains(id.as_str()))
                .map(|(id, status)| (id.clone(), *status))
                .collect(),
        }
    }

    /// 現在の年度での集計
    pub fn stats(&self, items: &[Wine]) -> TastingStats {
        let known = self.retain_known(items);
        let mut stats = TastingStats::default();
        for (_, status) in known.iter() {
            match status {
                TastingStatus::Tasted => stats.tasted += 1,
                TastingStatus::Want => stats.want += 1,
            }
        }
        stats
    }

    /// 指定ステータスのワイン（現在の年度に存在するもののみ、順位順）
    pub fn wines_with_status<'a>(&self, items: &'a [Wine], status: TastingStatus) -> Vec<&'a Wine> {
        let mut wines: Vec<&Wine> = items
            .iter()
            .filter(|w| self.get(&w.id) == Some(status))
            .collect();
        wines.sort_by_key(|w| w.display_rank);
        wines
    }

    /// 出力用の行を生成
    ///
    /// 現在の年度に存在しないidは黙って除外する。
    /// 並び順はステータスラベル（辞書順）→ 順位の昇順。
    pub fn to_export_rows(&self, items: &[Wine]) -> Vec<ExportRow> {
        let mut rows: Vec<ExportRow> = self
            .entries
            .iter()
            .filter_map(|(id, status)| {
                let wine = items.iter().find(|w| w.id == *id)?;
                Some(ExportRow::new(wine, *status))
            })
            .collect();

        rows.sort_by(|a, b| a.status.cmp(&b.status).then(a.rank.cmp(&b.rank)));
        rows
    }

    /// 共有リンク用のクエリ文字列（tasted のみ、want は含めない）
    ///
    /// `year=2024&tasted=12,40,77`
    pub fn share_query(&self, year: i32) -> String {
        let mut tasted: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, status)| **status == TastingStatus::Tasted)
            .map(|(id, _)| id.as_str())
            .collect();
        tasted.sort_by(|a, b| compare_ids(a, b));

        let encoded: Vec<String> = tasted
            .iter()
            .map(|id| url::form_urlencoded::byte_serialize(id.as_bytes()).collect::<String>())
            .collect();

        format!("year={}&tasted={}", year, encoded.join(","))
    }
}

/// id の並び順（数値idは数値順で先、それ以外は文字列順）
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// 年度内の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TastingStats {
    pub tasted: usize,
    pub want: usize,
}

impl TastingStats {
    pub fn total(&self) -> usize {
        self.tasted + self.want
    }
}

/// 出力1行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportRow {
    pub rank: u32,
    pub wine: String,
    pub winery: String,
    pub vintage: Option<Vintage>,
    pub color: String,
    pub region: String,
    pub country: String,
    pub status: String,
    pub score: Option<u32>,
    pub price: String,
}

impl ExportRow {
    pub fn new(wine: &Wine, status: TastingStatus) -> Self {
        Self {
            rank: wine.display_rank,
            wine: wine.name.clone(),
            winery: wine.producer_name.clone().unwrap_or_default(),
            vintage: wine.vintage,
            color: wine.category.clone().unwrap_or_default(),
            region: wine.region.clone().unwrap_or_default(),
            country: wine.locale.clone().unwrap_or_default(),
            status: status.label().to_string(),
            score: wine.score,
            price: format_price(wine.price),
        }
    }

    /// CSV等で使う文字列の列（EXPORT_COLUMNS と同じ順）
    pub fn fields(&self) -> [String; 10] {
        [
            self.rank.to_string(),
            self.wine.clone(),
            self.winery.clone(),
            self.vintage.map(|v| v.to_string()).unwrap_or_default(),
            self.color.clone(),
            self.region.clone(),
            self.country.clone(),
            self.status.clone(),
            self.score.map(|s| s.to_string()).unwrap_or_default(),
            self.price.clone(),
        ]
    }
}

/// 価格表示（$85、端数があれば $85.50、未設定は空）
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("${:.0}", p),
        Some(p) => format!("${:.2}", p),
        None => String::new(),
    }
}

/// 文字列を1キーで読み書きするストア
///
/// ブラウザでは localStorage、CLIではJSONファイルが実装する。
pub trait KeyValueStore {
    /// 値を読み込む（存在しない・読めない場合は None）
    fn read(&self, key: &str) -> Option<String>;

    /// 値を書き込む
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// メモリ上のストア（テスト・一時利用向け）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// セレクションセットと永続化ストアの組
pub struct SelectionManager<S: KeyValueStore> {
    store: S,
    selection: SelectionSet,
}

impl<S: KeyValueStore> SelectionManager<S> {
    /// ストアから復元（無い・壊れている場合は空）
    pub fn load(store: S) -> Self {
        let selection = store
            .read(STORAGE_KEY)
            .map(|json| SelectionSet::from_json(&json))
            .unwrap_or_default();
        debug!(entries = selection.len(), "テイスティング記録を復元");
        Self { store, selection }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// ステータスを変更して即座に保存
    pub fn set_status(&mut self, id: &str, status: Option<TastingStatus>) -> Result<()> {
        self.selection = self.selection.set_status(id, status);
        self.persist()
    }

    /// 共有リンクのidを tasted として取り込む
    pub fn import_tasted<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> Result<usize> {
        let mut count = 0;
        for id in ids {
            self.set_status(id, Some(TastingStatus::Tasted))?;
            count += 1;
        }
        Ok(count)
    }

    fn persist(&mut self) -> Result<()> {
        let json = self.selection.to_json()?;
        self.store.write(STORAGE_KEY, &json)
    }
}
