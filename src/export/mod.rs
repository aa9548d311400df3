pub mod excel;

use crate::error::Result;
use rfp_matcher_common::ItemMatchingResult;
use std::path::{Path, PathBuf};

/// 既定のJSON出力先（入力ファイルと同じ場所に `<stem>.matches.json`）
pub fn default_json_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("requirements");
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}.matches.json", stem))
}

/// 照合結果をJSONで保存
pub fn write_json(results: &[ItemMatchingResult], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
