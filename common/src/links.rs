//! 共有リンク・動画リンク
//!
//! 共有リンクは `?year=2024&tasted=12,40,77` 形式。
//! `wine` は単一ワインの詳細を開くためのパラメータ。

use crate::selection::SelectionSet;
use tracing::debug;

/// 動画リンクのベースURL
pub const VIDEO_BASE: &str = "https://top100.winespectator.com";

/// 動画が用意されている最初の年度
pub const FIRST_VIDEO_YEAR: i32 = 2013;

/// 動画が用意されている順位の上限
pub const VIDEO_MAX_RANK: u32 = 10;

/// URLクエリから読み取った共有情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLink {
    pub year: Option<i32>,
    pub tasted: Vec<String>,
    pub wine: Option<String>,
}

impl ShareLink {
    /// クエリ文字列を解析（先頭の `?` は有っても無くてもよい）
    ///
    /// 数値でない year は無視する。tasted の空要素は捨てる。
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut link = ShareLink::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "year" => match value.trim().parse::<i32>() {
                    Ok(year) => link.year = Some(year),
                    Err(_) => debug!(value = %value, "year が数値ではないため無視"),
                },
                "tasted" => {
                    link.tasted = value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "wine" => {
                    let id = value.trim();
                    if !id.is_empty() {
                        link.wine = Some(id.to_string());
                    }
                }
                _ => {}
            }
        }
        link
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.tasted.is_empty() && self.wine.is_none()
    }
}

/// 共有URLを生成（base の既存クエリは置き換える）
pub fn share_url(base: &str, selection: &SelectionSet, year: i32) -> String {
    let base = base.split(['?', '#']).next().unwrap_or(base);
    format!("{}?{}", base, selection.share_query(year))
}

/// クエリ文字列の year だけを差し替える
///
/// 他のパラメータは順序も表記もそのまま残す。year が無ければ末尾に追加。
/// 戻り値に先頭の `?` は付けない。
pub fn with_year_param(query: &str, year: i32) -> String {
    let query = query.trim().trim_start_matches('?');
    let year_pair = format!("year={}", year);
    let mut replaced = false;
    let mut pairs = Vec::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let key = pair.split('=').next().unwrap_or(pair);
        if key == "year" {
            if !replaced {
                pairs.push(year_pair.clone());
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }
    if !replaced {
        pairs.push(year_pair);
    }
    pairs.join("&")
}

/// 動画リンク（2013年以降の上位10本のみ）
pub fn video_url(year: i32, rank: u32) -> Option<String> {
    if year >= FIRST_VIDEO_YEAR && (1..=VIDEO_MAX_RANK).contains(&rank) {
        Some(format!("{}/{}/video/?play={}", VIDEO_BASE, year, rank))
    } else {
        None
    }
}
