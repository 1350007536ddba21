//! 年度別データセットの読み込み・作成（CLI版）

use crate::error::{Result, Top100Error};
use std::path::Path;
use top100_common::convert::csv_to_dataset_json;
use top100_common::dataset::{dataset_file_name, load_with_fallback, LoadedYear};

/// データディレクトリから年度のデータを読み込む
///
/// 要求年度が読めなければ代替年度を使う。
pub fn load_year(data_dir: &Path, year: i32, fallback_year: i32) -> Result<LoadedYear> {
    if !data_dir.is_dir() {
        return Err(Top100Error::DataDirNotFound(data_dir.display().to_string()));
    }

    let loaded = load_with_fallback(year, fallback_year, |y| {
        let path = data_dir.join(dataset_file_name(y));
        Ok(std::fs::read_to_string(path)?)
    })?;
    Ok(loaded)
}

/// 編集部CSVを年度別JSONに変換して書き出す
///
/// 変換したレコード数を返す。出力先の親ディレクトリは作成する。
pub fn convert_csv(input: &Path, output: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(input)?;
    let (count, json) = csv_to_dataset_json(&content)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, json)?;
    Ok(count)
}
