//! RFP Matcher Common Library
//!
//! 要求テキストの明細抽出・カタログ照合・順位付け・比較表作成。
//! 入出力を持たない純粋な計算部分で、CLIや他のサービスから共有される。

pub mod types;
pub mod error;
pub mod extractor;
pub mod catalog;
pub mod scorer;
pub mod ranker;
pub mod comparison;
pub mod engine;
pub mod export;

pub use types::{
    Attribute, AttributeSet, AttributeValue, CatalogEntry, ComparisonRow, Difference,
    ItemMatchingResult, MatchResult, RequirementRecord,
};
pub use error::{Error, Result};
pub use extractor::{extract, extract_line, parse_item};
pub use catalog::Catalog;
pub use scorer::{score, MatchScore};
pub use ranker::{rank, DEFAULT_TOP_N};
pub use comparison::{build_comparison, choose_sku};
pub use engine::{EngineOptions, MatchingEngine, RunSummary};
