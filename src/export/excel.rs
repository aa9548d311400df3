//! 比較表Excel出力（CLI版）

use crate::error::{MatcherError, Result};
use rfp_matcher_common::export::excel_core::generate_comparison_buffer;
use rfp_matcher_common::ItemMatchingResult;
use std::path::Path;

pub fn generate_excel(results: &[ItemMatchingResult], output_path: &Path) -> Result<()> {
    let buffer = generate_comparison_buffer(results)
        .map_err(|e| MatcherError::ExcelGeneration(e.to_string()))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, buffer)
        .map_err(|e| MatcherError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}
