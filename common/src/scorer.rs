//! 要求とカタログ品目の一致率計算
//!
//! 固定6属性のうち、どちらか一方にでも値がある属性を分母とし、
//! 一致した属性を分子とする。両方とも値なしの属性は数えない。

use crate::types::{Attribute, AttributeSet, Difference};
use std::collections::BTreeMap;

/// 一致率と不一致属性
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    /// 丸め前の一致率（順位付け用）
    pub raw_percent: f64,
    pub differences: BTreeMap<Attribute, Difference>,
}

impl MatchScore {
    /// 小数2桁に丸めた一致率
    pub fn percent(&self) -> f64 {
        round2(self.raw_percent)
    }
}

/// 一致率を計算
///
/// 片方だけに値がある属性は常に不一致。
/// 共通して値を持つ属性が無い場合（分母0）は 0.0。
pub fn score(requirement: &AttributeSet, entry: &AttributeSet) -> MatchScore {
    let mut matched = 0usize;
    let mut total = 0usize;
    let mut differences = BTreeMap::new();

    for attribute in Attribute::ALL {
        let req_value = requirement.get(attribute);
        let sku_value = entry.get(attribute);

        if req_value.is_none() && sku_value.is_none() {
            continue;
        }

        total += 1;
        let equal = match (&req_value, &sku_value) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if equal {
            matched += 1;
        } else {
            differences.insert(
                attribute,
                Difference {
                    requirement: req_value.map(|v| v.to_string()),
                    catalog: sku_value.map(|v| v.to_string()),
                },
            );
        }
    }

    let raw_percent = if total > 0 {
        matched as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    MatchScore {
        raw_percent,
        differences,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(size: Option<i64>, cores: Option<i64>) -> AttributeSet {
        AttributeSet {
            conductor_size_sqmm: size,
            cores,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_match() {
        let result = score(&attrs(Some(100), Some(3)), &attrs(Some(100), Some(3)));
        assert_eq!(result.percent(), 100.0);
        assert!(result.differences.is_empty());
    }

    #[test]
    fn test_partial_match() {
        let result = score(&attrs(Some(100), Some(3)), &attrs(Some(95), Some(3)));
        assert_eq!(result.percent(), 50.0);
        assert_eq!(result.differences.len(), 1);

        let diff = &result.differences[&Attribute::ConductorSize];
        assert_eq!(diff.requirement.as_deref(), Some("100"));
        assert_eq!(diff.catalog.as_deref(), Some("95"));
    }

    #[test]
    fn test_present_against_absent_is_mismatch() {
        let result = score(&attrs(Some(100), None), &attrs(Some(100), Some(3)));
        // 分母2（サイズ・心数）、分子1
        assert_eq!(result.percent(), 50.0);

        let diff = &result.differences[&Attribute::CoreCount];
        assert_eq!(diff.requirement, None);
        assert_eq!(diff.catalog.as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_requirement_scores_zero() {
        let requirement = AttributeSet::default();
        let result = score(&requirement, &attrs(Some(100), Some(3)));
        assert_eq!(result.percent(), 0.0);
    }

    #[test]
    fn test_both_empty_scores_zero() {
        let result = score(&AttributeSet::default(), &AttributeSet::default());
        assert_eq!(result.percent(), 0.0);
        assert!(result.differences.is_empty());
    }

    #[test]
    fn test_text_comparison_ignores_case_and_whitespace() {
        let requirement = AttributeSet {
            insulation: Some("XLPE".into()),
            armour_type: Some("steel armour".into()),
            ..Default::default()
        };
        let entry = AttributeSet {
            insulation: Some(" xlpe".into()),
            armour_type: Some("Steel Armour ".into()),
            ..Default::default()
        };
        let result = score(&requirement, &entry);
        assert_eq!(result.percent(), 100.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let requirement = AttributeSet {
            conductor_size_sqmm: Some(100),
            cores: Some(3),
            conductor_material: Some("copper".into()),
            ..Default::default()
        };
        let entry = AttributeSet {
            conductor_size_sqmm: Some(100),
            cores: Some(4),
            conductor_material: Some("aluminium".into()),
            ..Default::default()
        };
        let result = score(&requirement, &entry);
        assert_eq!(result.percent(), 33.33);
        assert!((result.raw_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_differences_only_for_disagreements() {
        let requirement = AttributeSet {
            cores: Some(3),
            insulation: Some("PVC".into()),
            ..Default::default()
        };
        let entry = AttributeSet {
            cores: Some(3),
            insulation: Some("XLPE".into()),
            ..Default::default()
        };
        let result = score(&requirement, &entry);
        let keys: Vec<Attribute> = result.differences.keys().copied().collect();
        assert_eq!(keys, vec![Attribute::InsulationType]);
        assert!(result.percent() >= 0.0 && result.percent() <= 100.0);
    }
}
