//! 比較表Excel生成（共通ライブラリ）
//!
//! 1枚目に明細一覧（Summary）、以降は明細ごとに比較表シートを作成する

use crate::error::{Error, Result};
use crate::types::ItemMatchingResult;
use rust_xlsxwriter::*;

const SUMMARY_SHEET: &str = "Summary";
const SUMMARY_HEADERS: [&str; 5] = ["No.", "Description", "Quantity", "Chosen SKU", "Match %"];
const EMPTY_CELL: &str = "-";

/// 比較表Excelをバッファに生成
pub fn generate_comparison_buffer(results: &[ItemMatchingResult]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let percent_format = Format::new()
        .set_num_format("0.00")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 明細一覧
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET).map_err(xlsx_error)?;
        sheet.set_column_width(1, 60).map_err(xlsx_error)?;
        sheet.set_column_width(3, 20).map_err(xlsx_error)?;

        for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(xlsx_error)?;
        }

        for (idx, result) in results.iter().enumerate() {
            let row = idx as u32 + 1;
            sheet.write_number_with_format(row, 0, (idx + 1) as f64, &value_format).map_err(xlsx_error)?;
            sheet
                .write_string_with_format(row, 1, &result.requirement.description, &value_format)
                .map_err(xlsx_error)?;
            sheet
                .write_number_with_format(row, 2, result.requirement.quantity as f64, &value_format)
                .map_err(xlsx_error)?;
            sheet
                .write_string_with_format(row, 3, result.chosen_sku.as_deref().unwrap_or(EMPTY_CELL), &value_format)
                .map_err(xlsx_error)?;
            let written = match result.chosen_match_percent() {
                Some(p) => sheet.write_number_with_format(row, 4, p, &percent_format),
                None => sheet.write_string_with_format(row, 4, EMPTY_CELL, &value_format),
            };
            written.map_err(xlsx_error)?;
        }
    }

    // 明細ごとの比較表
    for (idx, result) in results.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(format!("Item {}", idx + 1)).map_err(xlsx_error)?;
        sheet.set_column_width(0, 22).map_err(xlsx_error)?;
        sheet.set_column_width(1, 18).map_err(xlsx_error)?;

        let info_rows = [
            ("Description", result.requirement.description.clone()),
            ("Quantity", result.requirement.quantity.to_string()),
            ("Chosen SKU", result.chosen_sku.clone().unwrap_or_else(|| EMPTY_CELL.to_string())),
        ];
        for (row, (label, value)) in info_rows.iter().enumerate() {
            sheet.write_string_with_format(row as u32, 0, *label, &header_format).map_err(xlsx_error)?;
            sheet.write_string_with_format(row as u32, 1, value, &value_format).map_err(xlsx_error)?;
        }

        let table_row: u32 = 4;
        sheet.write_string_with_format(table_row, 0, "Parameter", &header_format).map_err(xlsx_error)?;
        sheet.write_string_with_format(table_row, 1, "Requirement", &header_format).map_err(xlsx_error)?;
        for (col, m) in result.top_matches.iter().enumerate() {
            let col = col as u16 + 2;
            sheet.set_column_width(col, 18).map_err(xlsx_error)?;
            sheet
                .write_string_with_format(table_row, col, format!("{} ({:.2}%)", m.sku, m.match_percent), &header_format)
                .map_err(xlsx_error)?;
        }

        for (offset, comparison) in result.comparison_table.iter().enumerate() {
            let row = table_row + 1 + offset as u32;
            sheet.write_string_with_format(row, 0, comparison.attribute.name(), &header_format).map_err(xlsx_error)?;
            sheet
                .write_string_with_format(row, 1, comparison.requirement.as_deref().unwrap_or(EMPTY_CELL), &value_format)
                .map_err(xlsx_error)?;
            for (col, value) in comparison.matches.iter().enumerate() {
                sheet
                    .write_string_with_format(row, col as u16 + 2, value.as_deref().unwrap_or(EMPTY_CELL), &value_format)
                    .map_err(xlsx_error)?;
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

fn xlsx_error(e: XlsxError) -> Error {
    Error::Export(format!("Excel生成エラー: {}", e))
}
