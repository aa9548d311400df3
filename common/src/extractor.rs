//! 要求テキストからの属性抽出
//!
//! 箇条書き（先頭が `-`）の行だけを明細行として扱い、
//! 1行ごとに固定6属性と数量を抽出する。
//!
//! ## 抽出ルール
//! - 導体サイズ: 最初の「数値 + sqmm」
//! - 心数: 最初の「数値 + core/cores」
//! - 定格電圧: 最初の「数値 + V」
//! - 導体材質・絶縁・外装: キーワード一覧の先頭から順に検索（具体的な語を先に）
//! - 数量: 行頭の「数値 + m/meter/metre/meters/metres」、なければ1

use crate::types::{Attribute, AttributeValue, RequirementRecord};
use regex::Regex;
use tracing::info;

/// 属性ごとの抽出方法
enum Rule {
    /// 最初のキャプチャを整数として読む
    Integer(Regex),
    /// キーワード一覧を順に探し、一覧側の表記で返す
    Keyword(&'static [&'static str]),
}

const MATERIAL_KEYWORDS: &[&str] = &["copper", "aluminium", "aluminum"];
const INSULATION_KEYWORDS: &[&str] = &["XLPE", "PVC"];
// "steel armour" を汎用の "armour" より先に評価する
const ARMOUR_KEYWORDS: &[&str] = &["steel armour", "aluminium armour", "armour"];

lazy_static::lazy_static! {
    static ref RULES: Vec<(Attribute, Rule)> = vec![
        (Attribute::ConductorSize, Rule::Integer(Regex::new(r"(?i)([0-9]+)\s*sqmm").unwrap())),
        (Attribute::CoreCount, Rule::Integer(Regex::new(r"(?i)([0-9]+)\s*core").unwrap())),
        (Attribute::VoltageRating, Rule::Integer(Regex::new(r"(?i)([0-9]+)\s*V").unwrap())),
        (Attribute::ConductorMaterial, Rule::Keyword(MATERIAL_KEYWORDS)),
        (Attribute::InsulationType, Rule::Keyword(INSULATION_KEYWORDS)),
        (Attribute::ArmourType, Rule::Keyword(ARMOUR_KEYWORDS)),
    ];

    static ref QUANTITY_RE: Regex =
        Regex::new(r"(?i)^([0-9]+)\s*(m|meter|metre|meters|metres)\b").unwrap();
}

impl Rule {
    fn apply(&self, text: &str) -> Option<AttributeValue> {
        match self {
            Rule::Integer(re) => search_int(re, text).map(AttributeValue::Integer),
            Rule::Keyword(choices) => {
                search_choice(text, *choices).map(|c| AttributeValue::Text(c.to_string()))
            }
        }
    }
}

/// テキスト全体から明細行を抽出
///
/// 行の順序は入力の順序を保つ。箇条書きでない行は無視する。
pub fn extract(text: &str) -> Vec<RequirementRecord> {
    let items: Vec<RequirementRecord> = text.lines().filter_map(extract_line).collect();
    info!("Parsed {} requirement items from scope text", items.len());
    items
}

/// 1行を明細として抽出（箇条書きでなければ None）
pub fn extract_line(raw_line: &str) -> Option<RequirementRecord> {
    let line = raw_line.trim();
    let body = line.strip_prefix('-')?;
    let description = body.trim_start_matches('-').trim();

    // 記号だけの行は明細にしない
    if description.is_empty() {
        return None;
    }

    Some(parse_item(description))
}

/// 箇条書き記号を除いた明細文から要求を組み立てる
///
/// 属性が1つも見つからなくても要求は返す（数量1、属性なし）
pub fn parse_item(description: &str) -> RequirementRecord {
    let mut record = RequirementRecord::new(description);

    for (attribute, rule) in RULES.iter() {
        if let Some(value) = rule.apply(description) {
            record.attributes.set(*attribute, value);
        }
    }

    record.quantity = search_int(&QUANTITY_RE, description)
        .and_then(|q| u64::try_from(q).ok())
        .filter(|q| *q > 0)
        .unwrap_or(1);

    record
}

/// 最初の一致だけを整数化する（桁あふれなら None、次の一致は探さない）
fn search_int(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

fn search_choice(text: &str, choices: &'static [&'static str]) -> Option<&'static str> {
    let lower = text.to_lowercase();
    choices
        .iter()
        .find(|c| lower.contains(&c.to_lowercase()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cable_line() {
        let items = extract("- 100 sqmm 3 core copper XLPE 1100V steel armour cable");
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.description, "100 sqmm 3 core copper XLPE 1100V steel armour cable");
        assert_eq!(item.attributes.conductor_size_sqmm, Some(100));
        assert_eq!(item.attributes.cores, Some(3));
        assert_eq!(item.attributes.conductor_material.as_deref(), Some("copper"));
        assert_eq!(item.attributes.insulation.as_deref(), Some("XLPE"));
        assert_eq!(item.attributes.voltage_rating, Some(1100));
        assert_eq!(item.attributes.armour_type.as_deref(), Some("steel armour"));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_non_bullet_lines_ignored() {
        let text = "Scope of supply:\n\
                    - 4 core PVC cable\n\
                    Note: delivery within 6 weeks\n\
                    \n\
                    - 2 cores aluminium\n";
        let items = extract(text);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "4 core PVC cable");
        assert_eq!(items[1].attributes.cores, Some(2));
        assert_eq!(items[1].attributes.conductor_material.as_deref(), Some("aluminium"));
    }

    #[test]
    fn test_keyword_case_uses_list_spelling() {
        let item = parse_item("COPPER conductor, xlpe insulated, Steel Armour");
        assert_eq!(item.attributes.conductor_material.as_deref(), Some("copper"));
        assert_eq!(item.attributes.insulation.as_deref(), Some("XLPE"));
        assert_eq!(item.attributes.armour_type.as_deref(), Some("steel armour"));
    }

    #[test]
    fn test_generic_armour() {
        let item = parse_item("3 core armoured cable");
        assert_eq!(item.attributes.armour_type.as_deref(), Some("armour"));

        let item = parse_item("aluminium armour 4 core");
        assert_eq!(item.attributes.armour_type.as_deref(), Some("aluminium armour"));
    }

    #[test]
    fn test_integer_units_case_and_spacing() {
        let item = parse_item("95SQMM 4Cores 650 v");
        assert_eq!(item.attributes.conductor_size_sqmm, Some(95));
        assert_eq!(item.attributes.cores, Some(4));
        assert_eq!(item.attributes.voltage_rating, Some(650));
    }

    #[test]
    fn test_quantity_at_line_start() {
        let item = parse_item("500 m 3 core copper cable");
        assert_eq!(item.quantity, 500);

        let item = parse_item("250 metres 95 sqmm PVC");
        assert_eq!(item.quantity, 250);

        let item = parse_item("1200meters armoured");
        assert_eq!(item.quantity, 1200);
    }

    #[test]
    fn test_quantity_not_at_start_defaults_to_one() {
        let item = parse_item("copper cable 500 m");
        assert_eq!(item.quantity, 1);

        // "mm" は単位 m として扱わない
        let item = parse_item("16 mm copper");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_zero_quantity_falls_back_to_one() {
        let item = parse_item("0 m copper");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_unparseable_bullet_still_yields_item() {
        let items = extract("- Miscellaneous accessories as required");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attributes.populated_count(), 0);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn test_dash_only_line_skipped() {
        let items = extract("-\n  --  \n- 3 core");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "3 core");
    }

    #[test]
    fn test_multiple_leading_dashes_and_indent() {
        let items = extract("   -- 2 core PVC");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "2 core PVC");
    }

    #[test]
    fn test_first_match_wins() {
        let item = parse_item("3 core or 4 core, 1100V / 650V");
        assert_eq!(item.attributes.cores, Some(3));
        assert_eq!(item.attributes.voltage_rating, Some(1100));
    }

    #[test]
    fn test_overflowing_number_leaves_attribute_absent() {
        // 最初の一致だけを見る。後ろの 95 sqmm は使わない
        let item = parse_item("99999999999999999999 sqmm or 95 sqmm, 3 core");
        assert_eq!(item.attributes.conductor_size_sqmm, None);
        assert_eq!(item.attributes.cores, Some(3));

        let item = parse_item("99999999999999999999 m copper");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_non_ascii_digits_not_matched() {
        // 全角数字は数値として扱わない
        let item = parse_item("１００ sqmm copper");
        assert_eq!(item.attributes.conductor_size_sqmm, None);
        assert_eq!(item.attributes.conductor_material.as_deref(), Some("copper"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let line = "- 240 m 185 sqmm 4 core aluminum PVC 1100V armour";
        let first = extract_line(line);
        let second = extract_line(line);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("").is_empty());
    }
}
