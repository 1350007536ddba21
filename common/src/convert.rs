//! 編集部CSV → 年度別JSON 変換
//!
//! 1行 = 1レコード。列名で値を取り出し、`parse_dataset` が読める形に整える。
//! 数値列は整数、空セルは null。文字列列は空でもそのまま残す。

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// 変換に必要な列
pub const REQUIRED_COLUMNS: [&str; 17] = [
    "Record ID",
    "Winery Display",
    "Wine Name",
    "Vintage",
    "Note (Full Output Display)",
    "Taster",
    "Color",
    "Country",
    "Region Display",
    "Score",
    "Price Only",
    "Bottle Size",
    "Issue Date (External)",
    "T100 Year",
    "T100 Rank",
    "Label URL",
    "Wine Type",
];

/// データセットの1レコード（出力JSONのキー順）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRecord {
    pub id: Option<i64>,
    pub winery_full: Option<String>,
    pub wine_full: Option<String>,
    /// 年（数値）、"NV"、または解釈できない文字列
    pub vintage: Option<Value>,
    pub note: Option<String>,
    pub taster_initials: Option<String>,
    pub color: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub score: Option<i64>,
    pub price: Option<i64>,
    pub alternate_bottle_size: Option<String>,
    pub issue_date: Option<String>,
    pub top100_year: Option<i64>,
    pub top100_rank: Option<i64>,
    pub label_url: Option<String>,
    pub wine_type: Option<String>,
}

/// CSV文字列をレコードに変換
///
/// 必要な列が欠けている場合と、数値列に整数でない値がある場合はエラー。
pub fn csv_to_records(content: &str) -> Result<Vec<DatasetRecord>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut rows = parse_csv(content).into_iter();

    let header = rows
        .next()
        .ok_or_else(|| Error::Parse("CSVにヘッダー行がありません".into()))?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !header.iter().any(|h| h == name))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Parse(format!("CSVに列がありません: {}", missing.join(", "))));
    }

    let mut records = Vec::new();
    for (index, fields) in rows.enumerate() {
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        // ヘッダーが1行目なのでデータは2行目から
        let row = Row {
            header: &header,
            fields: &fields,
            line: index + 2,
        };
        records.push(row.to_record()?);
    }

    info!(count = records.len(), "CSV変換完了");
    Ok(records)
}

/// CSV文字列を整形済みJSON配列に変換
pub fn csv_to_dataset_json(content: &str) -> Result<(usize, String)> {
    let records = csv_to_records(content)?;
    let json = serde_json::to_string_pretty(&records)?;
    Ok((records.len(), json))
}

struct Row<'a> {
    header: &'a [String],
    fields: &'a [String],
    line: usize,
}

impl Row<'_> {
    /// セルの値（行が短くて列が無い場合は None）
    fn cell(&self, name: &str) -> Option<&str> {
        let index = self.header.iter().position(|h| h == name)?;
        self.fields.get(index).map(String::as_str)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.cell(name).map(str::to_string)
    }

    /// 空セルは null
    fn optional_text(&self, name: &str) -> Option<String> {
        self.cell(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    fn int(&self, name: &str) -> Result<Option<i64>> {
        match self.cell(name).map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
                Error::Parse(format!("{}行目の {} が整数ではありません: {}", self.line, name, value))
            }),
        }
    }

    fn vintage(&self) -> Option<Value> {
        let value = self.cell("Vintage").filter(|v| !v.is_empty())?;
        if value == "NV" {
            return Some(Value::String(value.to_string()));
        }
        match value.trim().parse::<i64>() {
            Ok(year) => Some(Value::from(year)),
            Err(_) => {
                debug!(line = self.line, vintage = value, "ヴィンテージを文字列のまま出力");
                Some(Value::String(value.to_string()))
            }
        }
    }

    fn to_record(&self) -> Result<DatasetRecord> {
        Ok(DatasetRecord {
            id: self.int("Record ID")?,
            winery_full: self.text("Winery Display"),
            wine_full: self.text("Wine Name"),
            vintage: self.vintage(),
            note: self.text("Note (Full Output Display)"),
            taster_initials: self.text("Taster"),
            color: self.text("Color"),
            country: self.text("Country"),
            region: self.text("Region Display"),
            score: self.int("Score")?,
            price: self.int("Price Only")?,
            alternate_bottle_size: self.optional_text("Bottle Size"),
            issue_date: self.text("Issue Date (External)"),
            top100_year: self.int("T100 Year")?,
            top100_rank: self.int("T100 Rank")?,
            label_url: self.optional_text("Label URL"),
            wine_type: self.optional_text("Wine Type"),
        })
    }
}

/// CSVをフィールドの行に分解（ダブルクォート・"" エスケープ・セル内改行対応）
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        REQUIRED_COLUMNS.join(",")
    }

    #[test]
    fn test_parse_csv_quotes_and_newlines() {
        let rows = parse_csv("a,b,c\r\n1,\"x, \"\"y\"\"\",\"line1\nline2\"\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b", "c"]);
        assert_eq!(rows[1], vec!["1", "x, \"y\"", "line1\nline2"]);
    }

    #[test]
    fn test_record_mapping() {
        let csv = format!(
            "{}\n12,Ridge,Monte Bello,2019,\"Dark, firm.\",JL,Red,USA,Santa Cruz Mountains,97,285,,Nov 15 2024,2024,3,,Red Blend\n",
            header()
        );
        let records = csv_to_records(&csv).expect("変換失敗");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, Some(12));
        assert_eq!(r.wine_full.as_deref(), Some("Monte Bello"));
        assert_eq!(r.vintage, Some(Value::from(2019)));
        assert_eq!(r.note.as_deref(), Some("Dark, firm."));
        assert_eq!(r.score, Some(97));
        assert_eq!(r.price, Some(285));
        assert_eq!(r.alternate_bottle_size, None, "空セルは null");
        assert_eq!(r.label_url, None);
        assert_eq!(r.top100_rank, Some(3));
        assert_eq!(r.wine_type.as_deref(), Some("Red Blend"));
    }

    #[test]
    fn test_vintage_variants() {
        let csv = format!(
            "{}\n1,A,B,NV,,,,,,,,,,,,,\n2,A,B,,,,,,,,,,,,,,\n3,A,B,circa 1990,,,,,,,,,,,,,\n",
            header()
        );
        let records = csv_to_records(&csv).expect("変換失敗");
        assert_eq!(records[0].vintage, Some(Value::from("NV")));
        assert_eq!(records[1].vintage, None);
        assert_eq!(records[2].vintage, Some(Value::from("circa 1990")));
        // 文字列列は空でも残す
        assert_eq!(records[1].color.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_column_is_error() {
        let result = csv_to_records("Record ID,Wine Name\n1,A\n");
        match result {
            Err(Error::Parse(message)) => assert!(message.contains("Vintage"), "{}", message),
            other => panic!("列不足がエラーになっていません: {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_non_integer_score_is_error() {
        let csv = format!("{}\n1,A,B,2019,,,,,,ninety,,,,,,,\n", header());
        let result = csv_to_records(&csv);
        assert!(matches!(result, Err(Error::Parse(ref m)) if m.contains("2行目") && m.contains("Score")));
    }

    #[test]
    fn test_blank_lines_and_bom_skipped() {
        let csv = format!("\u{feff}{}\n\n1,A,B,2019,,,,,,,,,,,,,\n\n", header());
        let (count, json) = csv_to_dataset_json(&csv).expect("変換失敗");
        assert_eq!(count, 1);
        let wines = crate::normalizer::load_wines(&json).expect("読み込み失敗");
        assert_eq!(wines[0].id, "1");
        assert_eq!(wines[0].name, "B");
    }
}
