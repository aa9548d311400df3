//! サプライヤーカタログ
//!
//! 表形式のデータ（ヘッダー行 + データ行）から読み込み、
//! 読み込み後は変更しない。照合用の全件列挙とSKU検索を提供する。

use crate::error::Result;
use crate::types::{Attribute, AttributeSet, CatalogEntry};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// SKU列名
pub const SKU_COLUMN: &str = "sku";
/// SKU列の別名（`sku` が無いか空のとき使用）
pub const SKU_FALLBACK_COLUMN: &str = "product_sku";

/// 読み込み済みカタログ
///
/// 列挙順は読み込み順。SKU検索は同一SKUが複数あれば後勝ち。
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
}

/// ヘッダー名 → 列番号
struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            // 同名ヘッダーは先勝ち
            positions
                .entry(header.as_ref().trim().to_string())
                .or_insert(idx);
        }
        Self { positions }
    }

    fn get<'a, S: AsRef<str>>(&self, row: &'a [S], column: &str) -> Option<&'a str> {
        self.positions
            .get(column)
            .and_then(|idx| row.get(*idx))
            .map(|cell| cell.as_ref().trim())
            .filter(|cell| !cell.is_empty())
    }
}

impl Catalog {
    /// 品目リストから構築
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut index = HashMap::new();
        let mut duplicates = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            if index.insert(entry.sku.clone(), idx).is_some() && !duplicates.contains(&entry.sku) {
                warn!("Duplicate SKU {} in catalog, last row wins for lookup", entry.sku);
                duplicates.push(entry.sku.clone());
            }
        }

        Self {
            entries,
            index,
            duplicates,
        }
    }

    /// ヘッダーと行データから構築
    ///
    /// - 数値として読めないセル・空セルは値なし
    /// - SKUが無い行は警告して読み飛ばす
    pub fn from_table<H, R, C>(headers: &[H], rows: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        let columns = ColumnMap::new(headers);
        let mut entries = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            match row_to_entry(&columns, &row) {
                Some(entry) => entries.push(entry),
                // ヘッダーを1行目として数える
                None => warn!("Catalog row {} has no SKU, skipped", idx + 2),
            }
        }

        Self::from_entries(entries)
    }

    /// CSVファイルから読み込み
    pub fn from_csv(path: &Path) -> Result<Self> {
        info!("Loading catalog from {}", path.display());
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        info!("Loaded {} catalog SKUs", catalog.len());
        Ok(catalog)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    /// CSVリーダーから読み込み
    ///
    /// 列数の揃わない行も受け付ける。読めない行は警告して読み飛ばす。
    /// UTF-8 として読めないセルは空欄（属性なし）として扱う。
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let row_number = idx + 2;
            match record {
                Ok(record) => rows.push(
                    record
                        .iter()
                        .map(|cell| decode_cell(cell, row_number))
                        .collect::<Vec<_>>(),
                ),
                // 読み込み自体の失敗は行単位では回復しない
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => warn!("Catalog row {} unreadable, skipped: {}", row_number, e),
            }
        }

        Ok(Self::from_table(&headers, rows))
    }

    /// 全品目（読み込み順）
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// SKUで検索
    pub fn lookup(&self, sku: &str) -> Option<&CatalogEntry> {
        self.index.get(sku).map(|idx| &self.entries[*idx])
    }

    /// 2回以上出現したSKU（最初の重複出現順）
    pub fn duplicate_skus(&self) -> &[String] {
        &self.duplicates
    }

    /// 異なるSKUの数
    pub fn distinct_skus(&self) -> usize {
        self.index.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn row_to_entry<C: AsRef<str>>(columns: &ColumnMap, row: &[C]) -> Option<CatalogEntry> {
    let sku = columns
        .get(row, SKU_COLUMN)
        .or_else(|| columns.get(row, SKU_FALLBACK_COLUMN))?;

    let mut attributes = AttributeSet::default();
    for attribute in Attribute::ALL {
        if let Some(value) = columns
            .get(row, attribute.name())
            .and_then(|cell| attribute.parse_cell(cell))
        {
            attributes.set(attribute, value);
        }
    }

    Some(CatalogEntry::new(sku, attributes))
}

/// セルのバイト列を文字列化（UTF-8 でなければ空欄）
fn decode_cell(cell: &[u8], row_number: usize) -> String {
    match std::str::from_utf8(cell) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("Catalog row {} has a non-UTF-8 cell, treated as blank", row_number);
            String::new()
        }
    }
}
