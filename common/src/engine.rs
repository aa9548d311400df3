//! 照合エンジン
//!
//! 要求テキスト → 明細抽出 → 明細ごとに順位付け → 比較表・選定SKU。
//! 内部状態を持たず、同じ入力には常に同じ結果を返す。

use crate::catalog::Catalog;
use crate::comparison::{build_comparison, choose_sku};
use crate::extractor::extract;
use crate::ranker::{rank, DEFAULT_TOP_N};
use crate::types::{ItemMatchingResult, RequirementRecord};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// エンジン設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// 明細ごとの候補数
    pub top_n: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    options: EngineOptions,
}

impl MatchingEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// 要求テキスト全体を照合
    ///
    /// 結果の順序は抽出した明細の順序と同じ
    pub fn run(&self, text: &str, catalog: &Catalog) -> Vec<ItemMatchingResult> {
        let items = extract(text);
        self.run_items(items, catalog)
    }

    /// 抽出済みの要求を照合
    pub fn run_items(
        &self,
        items: Vec<RequirementRecord>,
        catalog: &Catalog,
    ) -> Vec<ItemMatchingResult> {
        items
            .into_par_iter()
            .map(|item| self.match_item(item, catalog))
            .collect()
    }

    /// 要求1件を照合
    pub fn match_item(&self, requirement: RequirementRecord, catalog: &Catalog) -> ItemMatchingResult {
        let top_matches = rank(&requirement, catalog, self.options.top_n);
        let chosen_sku = choose_sku(&top_matches);
        let comparison_table = build_comparison(&requirement, &top_matches, catalog);

        match (&chosen_sku, top_matches.first()) {
            (Some(sku), Some(best)) if best.match_percent == 0.0 => {
                warn!(
                    "Chosen SKU {} for '{}' has 0% match, review selection",
                    sku, requirement.description
                );
            }
            (Some(sku), Some(best)) => {
                debug!("'{}' -> {} ({:.2}%)", requirement.description, sku, best.match_percent);
            }
            _ => warn!("No SKU selected for '{}'", requirement.description),
        }

        ItemMatchingResult {
            requirement,
            top_matches,
            chosen_sku,
            comparison_table,
        }
    }
}

/// 照合結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// 明細数
    pub total_items: usize,
    /// SKUを選定できた明細数
    pub selected_items: usize,
    /// 選定なしの明細数
    pub unselected_items: usize,
    /// 選定SKUが0%一致の明細数
    pub zero_match_selections: usize,
    /// 100%一致の明細数
    pub full_matches: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ItemMatchingResult]) -> Self {
        let mut summary = Self {
            total_items: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.chosen_sku.is_none() {
                summary.unselected_items += 1;
                continue;
            }
            summary.selected_items += 1;
            match result.chosen_match_percent() {
                Some(p) if p == 0.0 => summary.zero_match_selections += 1,
                Some(p) if p >= 100.0 => summary.full_matches += 1,
                _ => {}
            }
        }

        summary
    }
}
