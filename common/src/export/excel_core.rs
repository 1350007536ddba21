//! Excel生成（共通ライブラリ）
//!
//! テイスティングリストを1シートの表として出力する

use crate::selection::{ExportRow, EXPORT_COLUMNS};
use rust_xlsxwriter::*;

/// 列幅（文字数ベース、EXPORT_COLUMNS と同じ順）
const COLUMN_WIDTHS: [f64; 10] = [6.0, 36.0, 28.0, 8.0, 9.0, 24.0, 14.0, 14.0, 7.0, 9.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 出力行（並び順はそのまま）
/// * `year` - シート名に使う年度
pub fn generate_excel_buffer(rows: &[ExportRow], year: i32) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x7B1E3A))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(format!("Top 100 {}", year))
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (title, width)) in EXPORT_COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *title, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (index, row) in rows.iter().enumerate() {
        let excel_row = index as u32 + 1;

        // 順位とスコアは数値セル、それ以外は文字列
        worksheet
            .write_number_with_format(excel_row, 0, row.rank as f64, &value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;

        for (col, value) in row.fields().iter().enumerate().skip(1) {
            let col = col as u16;
            let written = match (col, row.score) {
                (8, Some(score)) => {
                    worksheet.write_number_with_format(excel_row, col, score as f64, &value_format)
                }
                _ => worksheet.write_string_with_format(excel_row, col, value, &value_format),
            };
            written.map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::TastingStatus;
    use crate::types::Wine;

    #[test]
    fn test_generate_excel_buffer_is_zip() {
        let wine = Wine {
            id: "1".to_string(),
            display_rank: 1,
            name: "Test".to_string(),
            score: Some(95),
            ..Default::default()
        };
        let rows = vec![ExportRow::new(&wine, TastingStatus::Want)];
        let buffer = generate_excel_buffer(&rows, 2024).expect("Excel生成失敗");
        // xlsx は zip 形式
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_excel_buffer_empty() {
        let buffer = generate_excel_buffer(&[], 2024).expect("Excel生成失敗");
        assert!(!buffer.is_empty());
    }
}
