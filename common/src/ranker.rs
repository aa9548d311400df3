//! カタログ全件の順位付け

use crate::catalog::Catalog;
use crate::scorer::score;
use crate::types::{MatchResult, RequirementRecord};
use rayon::prelude::*;

/// 既定の候補数
pub const DEFAULT_TOP_N: usize = 3;

/// 要求をカタログ全件と照合し、上位 `top_n` 件を返す
///
/// 一致率の降順。同率はカタログの読み込み順（安定ソート）。
pub fn rank(requirement: &RequirementRecord, catalog: &Catalog, top_n: usize) -> Vec<MatchResult> {
    // collect は入力順を保つ
    let mut scored: Vec<(f64, MatchResult)> = catalog
        .all()
        .par_iter()
        .map(|entry| {
            let result = score(&requirement.attributes, &entry.attributes);
            let match_result = MatchResult {
                sku: entry.sku.clone(),
                match_percent: result.percent(),
                differences: result.differences,
            };
            (result.raw_percent, match_result)
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(top_n);
    scored.into_iter().map(|(_, m)| m).collect()
}
