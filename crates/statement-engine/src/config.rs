//! Statement phrasing and rule-table configuration
//!
//! Every string the engine emits comes from here. Templates use `{name}`
//! placeholders. All structs are `#[serde(default)]`, so a TOML or JSON
//! document only needs to name the fields it overrides.

use crate::patterns::{
    FactRuleRow, EN_EMOTIONAL_LEXEMES, EN_FACT_RULES, EN_SAMPLE_PREFIXES, JA_EMOTIONAL_LEXEMES,
    JA_FACT_RULES, JA_SAMPLE_PREFIXES,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use shared_types::Locale;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([A-Za-z_]+)\}").unwrap();
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    pub locale: Locale,
    pub normalizer: NormalizerConfig,
    pub phrasing: PhrasingConfig,
    /// Offset applied to the clock before taking the issue date
    pub utc_offset_minutes: i32,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl StatementConfig {
    pub fn english() -> Self {
        Self {
            locale: Locale::English,
            normalizer: NormalizerConfig::english(),
            phrasing: PhrasingConfig::english(),
            utc_offset_minutes: 0,
        }
    }

    pub fn japanese() -> Self {
        Self {
            locale: Locale::Japanese,
            normalizer: NormalizerConfig::japanese(),
            phrasing: PhrasingConfig::japanese(),
            utc_offset_minutes: 9 * 60,
        }
    }

    pub fn preset(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::Japanese => Self::japanese(),
        }
    }
}

/// One row of the fact-extraction table
///
/// Matches when any `any_of` pattern matches (or `any_of` is empty) and every
/// `all_of` pattern matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRuleSpec {
    pub label: String,
    #[serde(default)]
    pub any_of: Vec<String>,
    #[serde(default)]
    pub all_of: Vec<String>,
}

impl From<&FactRuleRow> for FactRuleSpec {
    fn from((label, any_of, all_of): &FactRuleRow) -> Self {
        Self {
            label: label.to_string(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            all_of: all_of.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub sample_prefixes: Vec<String>,
    /// Removed as literal, case-insensitive substrings, in order
    pub lexemes: Vec<String>,
    pub fact_rules: Vec<FactRuleSpec>,
    /// Fixed actor designation used in every statement
    pub actor: String,
    pub single_fact: String,
    pub multiple_facts: String,
    pub no_fact: String,
    pub terminal: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl NormalizerConfig {
    pub fn english() -> Self {
        Self {
            sample_prefixes: to_strings(EN_SAMPLE_PREFIXES),
            lexemes: to_strings(EN_EMOTIONAL_LEXEMES),
            fact_rules: EN_FACT_RULES.iter().map(FactRuleSpec::from).collect(),
            actor: "the other party".to_string(),
            single_fact: "{actor} performed {fact}".to_string(),
            multiple_facts: "{actor} performed {fact} and other such acts".to_string(),
            no_fact: "{actor} engaged in inappropriate conduct".to_string(),
            terminal: ".".to_string(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            sample_prefixes: to_strings(JA_SAMPLE_PREFIXES),
            lexemes: to_strings(JA_EMOTIONAL_LEXEMES),
            fact_rules: JA_FACT_RULES.iter().map(FactRuleSpec::from).collect(),
            actor: "相手方".to_string(),
            single_fact: "{actor}が{fact}を行った".to_string(),
            multiple_facts: "{actor}が{fact}等の行為を行った".to_string(),
            no_fact: "{actor}が不適切な言動を行った".to_string(),
            terminal: "。".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhrasingConfig {
    pub court_placeholder: String,
    pub introduction: String,
    /// Appended to the introduction when records exist
    pub record_period: String,
    /// Appended to the introduction when there are no records
    pub record_count: String,
    pub clause_separator: String,
    pub location_phrase: String,
    pub notes_wrapper: String,
    pub note_separator: String,
    /// Substring the capture form leaves in GPS-filled locations
    pub gps_marker: String,
    pub gps_note: String,
    pub weather_note: String,
    pub temperature: String,
    pub wind_speed: String,
    pub medical: MedicalPhrasing,
}

impl Default for PhrasingConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl PhrasingConfig {
    pub fn english() -> Self {
        Self {
            court_placeholder: "To the ________ Family Court".to_string(),
            introduction: "I hereby state the following regarding the circumstances that led to \
                           the breakdown of the marital relationship and the unlawful conduct of \
                           the other party, based on my daily records (including automatically \
                           recorded dates, times and location information)."
                .to_string(),
            record_period: " (Recording period: {first} to {last} / {count} records in total)"
                .to_string(),
            record_count: " ({count} records in total)".to_string(),
            clause_separator: ", ".to_string(),
            location_phrase: "at {location}, ".to_string(),
            notes_wrapper: " ({notes})".to_string(),
            note_separator: " / ".to_string(),
            gps_marker: "GPS acquired".to_string(),
            gps_note: "location data acquired via GPS".to_string(),
            weather_note: "weather: {details}".to_string(),
            temperature: "{value}°C".to_string(),
            wind_speed: "wind {value} km/h".to_string(),
            medical: MedicalPhrasing::english(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            court_placeholder: "〇〇家庭裁判所 御中".to_string(),
            introduction: "婚姻関係破綻に至る経緯、および相手方の不法行為について、以下の通り日々の記録\
                           （日時・位置情報等の自動記録を含む）に基づき陳述いたします。"
                .to_string(),
            record_period: "（記録期間: {first}〜{last} / 全{count}件）".to_string(),
            record_count: "（全{count}件）".to_string(),
            clause_separator: "、".to_string(),
            location_phrase: "{location}にて、".to_string(),
            notes_wrapper: "（{notes}）".to_string(),
            note_separator: " / ".to_string(),
            gps_marker: "GPS取得済".to_string(),
            gps_note: "位置情報はGPS取得済".to_string(),
            weather_note: "天候: {details}".to_string(),
            temperature: "気温{value}℃".to_string(),
            wind_speed: "風速{value}km/h".to_string(),
            medical: MedicalPhrasing::japanese(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalPhrasing {
    pub clause: String,
    pub field: String,
    pub field_separator: String,
    pub proof_delimiter: String,
    pub visit_type: String,
    pub facility: String,
    pub department: String,
    pub diagnosis: String,
    pub severity: String,
    pub proofs: String,
    pub memo: String,
    /// Visit type that does not count as evidence on its own
    pub default_visit_type: String,
    /// Severity value omitted from the appendix
    pub unknown_severity: String,
}

impl Default for MedicalPhrasing {
    fn default() -> Self {
        Self::english()
    }
}

impl MedicalPhrasing {
    pub fn english() -> Self {
        Self {
            clause: "It is additionally noted that the subject visited a medical provider \
                     during this period ({fields})"
                .to_string(),
            field: "{label}: {value}".to_string(),
            field_separator: " / ".to_string(),
            proof_delimiter: ", ".to_string(),
            visit_type: "visit type".to_string(),
            facility: "facility".to_string(),
            department: "department".to_string(),
            diagnosis: "diagnosis/findings".to_string(),
            severity: "severity".to_string(),
            proofs: "documents".to_string(),
            memo: "notes".to_string(),
            default_visit_type: "outpatient".to_string(),
            unknown_severity: "unknown".to_string(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            clause: "なお、当該時期に医療機関を受診した（{fields}）".to_string(),
            field: "{label}: {value}".to_string(),
            field_separator: " / ".to_string(),
            proof_delimiter: "、".to_string(),
            visit_type: "種別".to_string(),
            facility: "医療機関".to_string(),
            department: "診療科".to_string(),
            diagnosis: "診断名/所見".to_string(),
            severity: "程度".to_string(),
            proofs: "資料".to_string(),
            memo: "補足".to_string(),
            default_visit_type: "通院".to_string(),
            unknown_severity: "不明".to_string(),
        }
    }
}

/// Substitute `{name}` placeholders in a template
///
/// Substitution is a single pass over the template: inserted values are never
/// scanned again, and unknown placeholders are left as written.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        assert_eq!(
            fill("{a} and {b}, again {a}", &[("a", "x"), ("b", "y")]),
            "x and y, again x"
        );
        assert_eq!(fill("no placeholders", &[("a", "x")]), "no placeholders");
    }

    #[test]
    fn test_fill_does_not_rescan_inserted_values() {
        assert_eq!(
            fill("{first} to {last}", &[("first", "{last}"), ("last", "X")]),
            "{last} to X"
        );
        assert_eq!(fill("{actor} {fact}", &[("actor", "A")]), "A {fact}");
    }

    #[test]
    fn test_preset_matches_locale() {
        assert_eq!(StatementConfig::preset(Locale::Japanese).locale, Locale::Japanese);
        assert_eq!(StatementConfig::default(), StatementConfig::english());
        assert_eq!(StatementConfig::japanese().utc_offset_minutes, 540);
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let config: StatementConfig =
            serde_json::from_str(r#"{"normalizer": {"actor": "the respondent"}}"#).unwrap();
        assert_eq!(config.normalizer.actor, "the respondent");
        assert_eq!(config.normalizer.terminal, ".");
        assert_eq!(config.phrasing, PhrasingConfig::english());
    }

    #[test]
    fn test_fact_rule_spec_defaults_pattern_lists() {
        let rule: FactRuleSpec = serde_json::from_str(r#"{"label": "x", "any_of": ["a"]}"#).unwrap();
        assert!(rule.all_of.is_empty());
    }
}
