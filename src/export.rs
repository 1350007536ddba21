//! テイスティングリストのファイル出力（CLI版）

use crate::error::{Result, Top100Error};
use std::path::{Path, PathBuf};
use top100_common::export::{excel_core, export_file_name, to_csv, to_json, ExportFormat};
use top100_common::selection::ExportRow;

/// 出力先パスを決定
///
/// ディレクトリまたは拡張子なしの指定ならその中に既定のファイル名で出力する。
pub fn output_path_for_format(
    output: &Path,
    year: i32,
    date: &str,
    format: ExportFormat,
) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(year, date, format))
    } else {
        output.to_path_buf()
    }
}

/// 出力内容を生成
pub fn render(rows: &[ExportRow], year: i32, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => Ok(to_csv(rows).into_bytes()),
        ExportFormat::Json => Ok(to_json(rows)?.into_bytes()),
        ExportFormat::Xlsx => {
            excel_core::generate_excel_buffer(rows, year).map_err(Top100Error::Export)
        }
    }
}

/// ファイルに書き出して出力先を返す
pub fn write_export(
    rows: &[ExportRow],
    year: i32,
    date: &str,
    format: ExportFormat,
    output: &Path,
) -> Result<PathBuf> {
    let path = output_path_for_format(output, year, date, format);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, render(rows, year, format)?)?;
    Ok(path)
}

/// 今日の日付（YYYY-MM-DD）
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
