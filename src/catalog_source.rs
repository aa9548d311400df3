//! カタログファイルの読み込み
//!
//! 拡張子で形式を判定する:
//! - xlsx/xlsm/xls/ods: 先頭シートを calamine で読み込み
//! - それ以外: CSV

use crate::error::{MatcherError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rfp_matcher_common::Catalog;
use std::path::Path;
use tracing::info;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// カタログ形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Workbook,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .map(|e| WORKBOOK_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or(false);

        if is_workbook {
            CatalogFormat::Workbook
        } else {
            CatalogFormat::Csv
        }
    }
}

/// カタログを読み込み
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(MatcherError::FileNotFound(path.display().to_string()));
    }

    match CatalogFormat::from_path(path) {
        CatalogFormat::Csv => Ok(Catalog::from_csv(path)?),
        CatalogFormat::Workbook => load_workbook(path),
    }
}

fn load_workbook(path: &Path) -> Result<Catalog> {
    info!("Loading catalog workbook from {}", path.display());

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MatcherError::Workbook(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MatcherError::Workbook(format!("シートがありません: {}", path.display())))?
        .map_err(|e| MatcherError::Workbook(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let body: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    let catalog = Catalog::from_table(&headers, body);
    info!("Loaded {} catalog SKUs", catalog.len());
    Ok(catalog)
}

/// セルを文字列化（整数値の小数は整数表記）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        // 日付・エラー値は属性として使わない
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("oem.csv")), CatalogFormat::Csv);
        assert_eq!(CatalogFormat::from_path(Path::new("oem.XLSX")), CatalogFormat::Workbook);
        assert_eq!(CatalogFormat::from_path(Path::new("oem.ods")), CatalogFormat::Workbook);
        assert_eq!(CatalogFormat::from_path(Path::new("oem")), CatalogFormat::Csv);
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(100.0)), "100");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::String("XLPE".into())), "XLPE");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.csv"));
        assert!(matches!(result, Err(MatcherError::FileNotFound(_))));
    }
}
