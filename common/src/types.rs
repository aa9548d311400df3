//! 照合エンジンの型定義
//!
//! - Attribute: 比較対象の固定6属性
//! - AttributeSet: 要求仕様とカタログ品目で共有する属性スロット
//! - RequirementRecord: 要求テキスト1行から抽出した要求
//! - CatalogEntry: サプライヤーSKU 1件
//! - MatchResult / ComparisonRow / ItemMatchingResult: 照合結果

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 比較対象の属性（宣言順が評価順・表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "conductor_size_sqmm")]
    ConductorSize,
    #[serde(rename = "cores")]
    CoreCount,
    #[serde(rename = "conductor_material")]
    ConductorMaterial,
    #[serde(rename = "insulation")]
    InsulationType,
    #[serde(rename = "voltage_rating")]
    VoltageRating,
    #[serde(rename = "armour_type")]
    ArmourType,
}

/// 属性値の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Text,
}

impl Attribute {
    /// 全属性（固定順）
    pub const ALL: [Attribute; 6] = [
        Attribute::ConductorSize,
        Attribute::CoreCount,
        Attribute::ConductorMaterial,
        Attribute::InsulationType,
        Attribute::VoltageRating,
        Attribute::ArmourType,
    ];

    /// 属性名（カタログの列名と同じ）
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::ConductorSize => "conductor_size_sqmm",
            Attribute::CoreCount => "cores",
            Attribute::ConductorMaterial => "conductor_material",
            Attribute::InsulationType => "insulation",
            Attribute::VoltageRating => "voltage_rating",
            Attribute::ArmourType => "armour_type",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Attribute::ConductorSize | Attribute::CoreCount | Attribute::VoltageRating => {
                ValueKind::Integer
            }
            Attribute::ConductorMaterial | Attribute::InsulationType | Attribute::ArmourType => {
                ValueKind::Text
            }
        }
    }

    /// セル文字列を属性値に変換
    ///
    /// 数値として読めない・空文字は None（エラーにしない）
    pub fn parse_cell(&self, raw: &str) -> Option<AttributeValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self.kind() {
            ValueKind::Integer => trimmed.parse::<i64>().ok().map(AttributeValue::Integer),
            ValueKind::Text => Some(AttributeValue::Text(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 属性値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
}

impl AttributeValue {
    /// 照合ルールでの一致判定
    ///
    /// 整数同士は数値比較、それ以外は前後空白を除いた大文字小文字無視の文字列比較
    pub fn matches(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Integer(a), AttributeValue::Integer(b)) => a == b,
            _ => {
                let a = self.to_string();
                let b = other.to_string();
                a.trim().to_lowercase() == b.trim().to_lowercase()
            }
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

/// 6属性のスロット（各スロットは独立に有無を持つ）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    pub conductor_size_sqmm: Option<i64>,
    pub cores: Option<i64>,
    pub conductor_material: Option<String>,
    pub insulation: Option<String>,
    pub voltage_rating: Option<i64>,
    pub armour_type: Option<String>,
}

impl AttributeSet {
    /// 属性値を取得
    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::ConductorSize => self.conductor_size_sqmm.map(AttributeValue::Integer),
            Attribute::CoreCount => self.cores.map(AttributeValue::Integer),
            Attribute::ConductorMaterial => {
                self.conductor_material.clone().map(AttributeValue::Text)
            }
            Attribute::InsulationType => self.insulation.clone().map(AttributeValue::Text),
            Attribute::VoltageRating => self.voltage_rating.map(AttributeValue::Integer),
            Attribute::ArmourType => self.armour_type.clone().map(AttributeValue::Text),
        }
    }

    /// 属性値を設定
    ///
    /// 属性の種類と値の種類が食い違う場合は何もしない
    pub fn set(&mut self, attribute: Attribute, value: AttributeValue) {
        match (attribute, value) {
            (Attribute::ConductorSize, AttributeValue::Integer(v)) => {
                self.conductor_size_sqmm = Some(v)
            }
            (Attribute::CoreCount, AttributeValue::Integer(v)) => self.cores = Some(v),
            (Attribute::VoltageRating, AttributeValue::Integer(v)) => {
                self.voltage_rating = Some(v)
            }
            (Attribute::ConductorMaterial, AttributeValue::Text(s)) => {
                self.conductor_material = Some(s)
            }
            (Attribute::InsulationType, AttributeValue::Text(s)) => self.insulation = Some(s),
            (Attribute::ArmourType, AttributeValue::Text(s)) => self.armour_type = Some(s),
            _ => {}
        }
    }

    /// 属性値を文字列で取得（比較表・差分表示用）
    pub fn display_value(&self, attribute: Attribute) -> Option<String> {
        self.get(attribute).map(|v| v.to_string())
    }

    /// 設定済み属性の数
    pub fn populated_count(&self) -> usize {
        Attribute::ALL
            .iter()
            .filter(|a| self.get(**a).is_some())
            .count()
    }
}

/// 要求テキスト1行から抽出した要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRecord {
    /// 元の行（箇条書き記号を除去済み）
    pub description: String,
    #[serde(flatten)]
    pub attributes: AttributeSet,
    pub quantity: u64,
}

impl RequirementRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: AttributeSet::default(),
            quantity: 1,
        }
    }
}

/// カタログ品目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub sku: String,
    #[serde(flatten)]
    pub attributes: AttributeSet,
}

impl CatalogEntry {
    pub fn new(sku: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            sku: sku.into(),
            attributes,
        }
    }
}

/// 属性ごとの不一致（None は値なし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub requirement: Option<String>,
    pub catalog: Option<String>,
}

/// SKU 1件との照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub sku: String,
    /// 0.0〜100.0（小数2桁）
    pub match_percent: f64,
    #[serde(default)]
    pub differences: BTreeMap<Attribute, Difference>,
}

/// 比較表の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub attribute: Attribute,
    pub requirement: Option<String>,
    /// 順位順の各SKUの値
    pub matches: Vec<Option<String>>,
}

impl Serialize for ComparisonRow {
    /// `{parameter, requirement, match_1, ..., match_N}` 形式で出力
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.matches.len()))?;
        map.serialize_entry("parameter", self.attribute.name())?;
        map.serialize_entry("requirement", &self.requirement)?;
        for (idx, value) in self.matches.iter().enumerate() {
            map.serialize_entry(&format!("match_{}", idx + 1), value)?;
        }
        map.end()
    }
}

/// 要求1件分の照合結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMatchingResult {
    pub requirement: RequirementRecord,
    pub top_matches: Vec<MatchResult>,
    /// 1位のSKU（カタログが空なら None）
    pub chosen_sku: Option<String>,
    pub comparison_table: Vec<ComparisonRow>,
}

impl ItemMatchingResult {
    /// 選定SKUの一致率
    pub fn chosen_match_percent(&self) -> Option<f64> {
        self.top_matches.first().map(|m| m.match_percent)
    }
}
