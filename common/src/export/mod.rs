//! テイスティングリスト出力（CLI・WASM共通）
//!
//! - CSV: 全フィールドをダブルクォートで囲む
//! - JSON: ExportRow 配列を整形出力
//! - Excel: `excel` フィーチャー有効時のみ

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::error::Result;
use crate::selection::{ExportRow, EXPORT_COLUMNS};

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(format!("Unknown format: {}. Use csv, json, or xlsx", s)),
        }
    }
}

/// 出力ファイル名（`wine-tasting-list-2024-2025-03-01.csv`）
///
/// `date` は `YYYY-MM-DD` 形式の出力日。
pub fn export_file_name(year: i32, date: &str, format: ExportFormat) -> String {
    format!("wine-tasting-list-{}-{}.{}", year, date, format.extension())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// CSV文字列を生成（ヘッダー行 + データ行、改行は `\n`）
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        EXPORT_COLUMNS
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.fields()
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// JSON文字列を生成（整形済み）
pub fn to_json(rows: &[ExportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::TastingStatus;
    use crate::types::{Vintage, Wine};

    fn row(name: &str) -> ExportRow {
        let wine = Wine {
            id: "7".to_string(),
            display_rank: 7,
            name: name.to_string(),
            producer_name: Some("Ridge".to_string()),
            vintage: Some(Vintage::Year(2018)),
            category: Some("Red".to_string()),
            locale: Some("USA".to_string()),
            region: Some("Santa Cruz Mountains".to_string()),
            score: Some(97),
            price: Some(225.0),
            ..Default::default()
        };
        ExportRow::new(&wine, TastingStatus::Tasted)
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            r#""Rank","Wine","Winery","Vintage","Color","Region","Country","Status","Score","Price""#
        );
    }

    #[test]
    fn test_csv_quotes_every_field() {
        let csv = to_csv(&[row("Monte Bello")]);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""7","Monte Bello","Ridge","2018","Red","Santa Cruz Mountains","USA","Tasted","97","$225""#
        );
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let csv = to_csv(&[row("The \"Big\" Red")]);
        assert!(csv.contains(r#""The ""Big"" Red""#));
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = to_json(&[row("Monte Bello")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["Rank"], 7);
        assert_eq!(value[0]["Vintage"], 2018);
        assert_eq!(value[0]["Status"], "Tasted");
        assert_eq!(value[0]["Price"], "$225");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(2024, "2025-03-01", ExportFormat::Csv),
            "wine-tasting-list-2024-2025-03-01.csv"
        );
        assert_eq!(
            export_file_name(1999, "2025-03-01", ExportFormat::Json),
            "wine-tasting-list-1999-2025-03-01.json"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
