//! 属性ごとの比較表

use crate::catalog::Catalog;
use crate::types::{Attribute, ComparisonRow, MatchResult, RequirementRecord};

/// 要求と上位候補の比較表を作成
///
/// 6属性それぞれ1行。候補が0件でも6行を返す。
/// カタログに存在しないSKUの列は値なし。
pub fn build_comparison(
    requirement: &RequirementRecord,
    matches: &[MatchResult],
    catalog: &Catalog,
) -> Vec<ComparisonRow> {
    let entries: Vec<_> = matches.iter().map(|m| catalog.lookup(&m.sku)).collect();

    Attribute::ALL
        .iter()
        .map(|attribute| ComparisonRow {
            attribute: *attribute,
            requirement: requirement.attributes.display_value(*attribute),
            matches: entries
                .iter()
                .map(|entry| entry.and_then(|e| e.attributes.display_value(*attribute)))
                .collect(),
        })
        .collect()
}

/// 選定SKU（1位。0%でも選ぶ）
pub fn choose_sku(matches: &[MatchResult]) -> Option<String> {
    matches.first().map(|m| m.sku.clone())
}
