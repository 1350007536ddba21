//! 年度別データセット
//!
//! 1年度 = 1ファイル（`wines-2024.json`）。
//! 読めない年度は代替年度のデータで表示を続ける。

use crate::error::{Error, Result};
use crate::normalizer::load_wines;
use crate::types::Wine;
use tracing::{info, warn};

/// 最新の年度
pub const CURRENT_YEAR: i32 = 2025;

/// 最古の年度
pub const EARLIEST_YEAR: i32 = 1988;

/// 読み込み失敗時に使う年度
pub const FALLBACK_YEAR: i32 = 2024;

/// データファイル名
pub fn dataset_file_name(year: i32) -> String {
    format!("wines-{}.json", year)
}

/// 選択可能な年度（新しい順）
pub fn available_years(current: i32) -> Vec<i32> {
    (EARLIEST_YEAR..=current).rev().collect()
}

pub fn is_valid_year(year: i32, current: i32) -> bool {
    (EARLIEST_YEAR..=current).contains(&year)
}

/// 要求された年度を決定（範囲外・未指定は最新年度）
pub fn resolve_year(requested: Option<i32>, current: i32) -> i32 {
    match requested {
        Some(year) if is_valid_year(year, current) => year,
        Some(year) => {
            warn!(year, current, "範囲外の年度のため最新年度を使用");
            current
        }
        None => current,
    }
}

/// 読み込んだ年度のデータ
#[derive(Debug, Clone)]
pub struct LoadedYear {
    /// 要求された年度
    pub requested: i32,
    /// 実際に読み込んだ年度
    pub year: i32,
    pub wines: Vec<Wine>,
}

impl LoadedYear {
    pub fn used_fallback(&self) -> bool {
        self.requested != self.year
    }
}

/// 非同期読み込みの順番管理
///
/// 年度を素早く切り替えたとき、最後に出した要求の応答だけを採用する。
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい要求を登録してその番号を返す
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// 応答がまだ有効か（より新しい要求が出ていないか）
    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// 年度のデータを読み込む（失敗時は代替年度）
///
/// `read` は年度を受け取ってJSON文字列を返す。
/// 代替年度も読めない場合だけエラー。
pub fn load_with_fallback<F>(year: i32, fallback_year: i32, mut read: F) -> Result<LoadedYear>
where
    F: FnMut(i32) -> Result<String>,
{
    match read(year).and_then(|json| load_wines(&json)) {
        Ok(wines) => {
            info!(year, count = wines.len(), "データセット読み込み完了");
            return Ok(LoadedYear {
                requested: year,
                year,
                wines,
            });
        }
        Err(e) if year != fallback_year => {
            warn!(year, fallback_year, error = %e, "データセットを読めないため代替年度を使用");
        }
        Err(e) => return Err(e),
    }

    let wines = read(fallback_year)
        .and_then(|json| load_wines(&json))
        .map_err(|e| Error::Parse(format!("代替年度 {} も読み込めません: {}", fallback_year, e)))?;

    Ok(LoadedYear {
        requested: year,
        year: fallback_year,
        wines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_file_name() {
        assert_eq!(dataset_file_name(1999), "wines-1999.json");
    }

    #[test]
    fn test_available_years() {
        let years = available_years(CURRENT_YEAR);
        assert_eq!(years.first(), Some(&2025));
        assert_eq!(years.last(), Some(&1988));
        assert_eq!(years.len(), 38);
    }

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year(Some(2001), CURRENT_YEAR), 2001);
        assert_eq!(resolve_year(Some(1950), CURRENT_YEAR), CURRENT_YEAR);
        assert_eq!(resolve_year(None, CURRENT_YEAR), CURRENT_YEAR);
    }

    #[test]
    fn test_load_with_fallback() {
        let loaded = load_with_fallback(2010, FALLBACK_YEAR, |year| {
            if year == FALLBACK_YEAR {
                Ok(r#"[{"id": 1, "wine_full": "A"}]"#.to_string())
            } else {
                Err(Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")))
            }
        })
        .expect("代替年度の読み込み失敗");
        assert_eq!(loaded.year, FALLBACK_YEAR);
        assert!(loaded.used_fallback());
        assert_eq!(loaded.wines.len(), 1);
    }

    #[test]
    fn test_load_direct() {
        let loaded = load_with_fallback(2020, FALLBACK_YEAR, |_| Ok("[]".to_string())).unwrap();
        assert_eq!(loaded.year, 2020);
        assert!(!loaded.used_fallback());
    }

    #[test]
    fn test_load_fallback_fails() {
        let result = load_with_fallback(2010, FALLBACK_YEAR, |_| Ok("{".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_sequence_drops_stale_responses() {
        let mut sequence = LoadSequence::new();
        let first = sequence.begin();
        let second = sequence.begin();
        assert!(!sequence.is_latest(first), "古い要求の応答は捨てる");
        assert!(sequence.is_latest(second));

        // 同じ年度に戻しても先に出た要求は無効
        let third = sequence.begin();
        assert!(!sequence.is_latest(second));
        assert!(sequence.is_latest(third));
    }
}
