//! Page layout configuration

use serde::{Deserialize, Serialize};
use shared_types::Locale;

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_CAPACITY: usize = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_capacity: usize,
    pub title: String,
    pub continued_title: String,
    /// Table headings: date/time, location, category, detail, evidence
    pub columns: Vec<String>,
    pub evidence_mark: String,
    pub closing_heading: String,
    pub closing_hint: String,
    /// Used for free plans that do not supply their own watermark
    pub free_watermark: String,
    pub file_stem: String,
    pub preview_suffix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl LayoutConfig {
    pub fn english() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            title: "WRITTEN STATEMENT".to_string(),
            continued_title: "WRITTEN STATEMENT (continued)".to_string(),
            columns: vec![
                "Date / time".to_string(),
                "Location".to_string(),
                "Category".to_string(),
                "Details of conduct".to_string(),
                "Evidence".to_string(),
            ],
            evidence_mark: "Yes".to_string(),
            closing_heading: "[Petitioner's feelings]".to_string(),
            closing_hint: "(This space may be filled in by hand after printing.)".to_string(),
            free_watermark: "FREE PLAN PREVIEW".to_string(),
            file_stem: "written-statement".to_string(),
            preview_suffix: "preview".to_string(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            title: "陳 述 書".to_string(),
            continued_title: "陳 述 書（続き）".to_string(),
            columns: vec![
                "日時".to_string(),
                "場所".to_string(),
                "区分".to_string(),
                "内容　言動の詳細".to_string(),
                "証拠".to_string(),
            ],
            evidence_mark: "有".to_string(),
            closing_heading: "【申立人の心情】".to_string(),
            closing_hint: "（※ここには、出力後に、手書き等で心情を追記できます）".to_string(),
            free_watermark: "無料プラン プレビュー".to_string(),
            file_stem: "陳述書".to_string(),
            preview_suffix: "プレビュー".to_string(),
        }
    }

    pub fn preset(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::Japanese => Self::japanese(),
        }
    }
}
