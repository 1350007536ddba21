//! 年度別データセットの取得（fetch）

use gloo::net::http::Request;
use top100_common::dataset::{dataset_file_name, LoadedYear};
use top100_common::{load_wines, Wine};

/// データセットの配置パス
const DATA_PATH: &str = "data";

async fn fetch_wines(year: i32) -> Result<Vec<Wine>, String> {
    let url = format!("{}/{}", DATA_PATH, dataset_file_name(year));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("{}: {}", url, e))?;
    if !response.ok() {
        return Err(format!("{}: HTTP {}", url, response.status()));
    }
    let text = response.text().await.map_err(|e| e.to_string())?;
    load_wines(&text).map_err(|e| e.to_string())
}

/// 年度のデータを取得（失敗時は代替年度）
pub async fn load_year(year: i32, fallback_year: i32) -> Result<LoadedYear, String> {
    match fetch_wines(year).await {
        Ok(wines) => Ok(LoadedYear {
            requested: year,
            year,
            wines,
        }),
        Err(e) if year != fallback_year => {
            gloo::console::warn!(format!("{}年を読み込めません（{}）。{}年を表示します", year, e, fallback_year));
            let wines = fetch_wines(fallback_year).await?;
            Ok(LoadedYear {
                requested: year,
                year: fallback_year,
                wines,
            })
        }
        Err(e) => Err(e),
    }
}
