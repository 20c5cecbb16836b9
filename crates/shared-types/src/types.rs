use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Language used for every generated phrase in a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Japanese,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ja" | "japanese" => Ok(Locale::Japanese),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

/// Epoch value or date string, as stored by the journaling front end
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Milliseconds written as a float, e.g. `1736537400000.0`
    FractionalMillis(f64),
    /// ISO-8601 / RFC 3339 or locale date string
    Text(String),
}

/// `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any value that is not a usable time (objects, booleans, ...) reads as None
fn lenient_time<'de, D>(deserializer: D) -> Result<Option<TimeValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Time(TimeValue),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Time(value)) => Some(value),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Values of the wrong shape read as None
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw<T>>::deserialize(deserializer)? {
        Some(Raw::Value(value)) => Some(value),
        Some(Raw::Other(_)) | None => None,
    })
}

/// One raw, user-authored log entry
///
/// Field names follow the journaling front end's JSON (camelCase). Fields the
/// statement pipeline does not use (comments, ids) are ignored on input, and
/// `null` or malformed optional values read as empty.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncidentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String, // e.g., "2025/01/10"
    #[serde(deserialize_with = "null_as_default")]
    pub time: String, // e.g., "19:30"
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(deserialize_with = "lenient")]
    pub medical: Option<MedicalRecord>,
    #[serde(deserialize_with = "lenient")]
    pub weather: Option<WeatherSnapshot>,
    #[serde(deserialize_with = "lenient_time")]
    pub occurred_at: Option<TimeValue>,
    #[serde(deserialize_with = "lenient_time")]
    pub timestamp: Option<TimeValue>,
    #[serde(deserialize_with = "lenient_time")]
    pub created_at: Option<TimeValue>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String, // e.g., "image"
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Structured medical visit attached to a record
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalRecord {
    pub facility: Option<String>,
    pub department: Option<String>,
    pub visit_type: Option<String>,
    pub diagnosis: Option<String>,
    pub severity: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub proofs: Vec<String>,
    pub memo: Option<String>,
}

/// Weather auto-captured alongside a record
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>, // Celsius
    pub wind_speed: Option<f64>,  // km/h
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Name, falling back to email, falling back to empty
    pub fn display_name(&self) -> String {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

/// Entitlement flags supplied by billing
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanPolicy {
    pub is_free_plan: bool,
    pub watermark_text: Option<String>,
    pub max_pages: Option<usize>,
}

impl PlanPolicy {
    /// Paid plan: every page, no watermark
    pub fn full() -> Self {
        Self::default()
    }

    /// Free plan: one watermarked page
    pub fn free(watermark_text: impl Into<String>) -> Self {
        Self {
            is_free_plan: true,
            watermark_text: Some(watermark_text.into()),
            max_pages: Some(1),
        }
    }
}

/// Neutral, formally phrased transformation of one IncidentRecord
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedEvent {
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    pub detail: String, // Never empty
    pub evidence: bool,
    pub attachments: Vec<Attachment>,
    pub occurred_at: DateTime<Utc>, // Sort key the event was ordered by
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatementHeader {
    pub issue_date: String, // Formal phrase, e.g., "October 19, 2026"
    pub issued_on: NaiveDate,
    pub court_placeholder: String,
    pub author_name: String,
}

/// In-memory statement prior to pagination
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatementDocument {
    pub header: StatementHeader,
    pub introduction: String,
    pub events: Vec<NormalizedEvent>, // Non-decreasing by occurred_at
    pub plan_policy: PlanPolicy,
}

impl StatementDocument {
    pub fn with_policy(mut self, plan_policy: PlanPolicy) -> Self {
        self.plan_policy = plan_policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeaderBlock {
    pub title: String,
    pub court: String,
    pub issue_date: String,
    pub author: String,
}

/// Blank area left for hand-written remarks
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClosingSection {
    pub heading: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderPage {
    pub page_number: usize, // 1-indexed
    pub is_first: bool,
    pub is_last: bool,
    /// Continued-page title; None on the first page, which has the header block
    pub title: Option<String>,
    pub header_block: Option<HeaderBlock>,
    pub intro_block: Option<String>,
    pub rows: Vec<NormalizedEvent>,
    pub closing_section: Option<ClosingSection>,
    pub watermark: Option<String>,
}

/// Paginated instruction set handed to the external renderer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderPlan {
    pub pages: Vec<RenderPage>,
    pub columns: Vec<String>,
    pub evidence_mark: String,
    pub total_events: usize,
    pub rendered_events: usize,
    pub truncated: bool,
    pub suggested_file_name: String,
}

impl RenderPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every row across all pages, in page order
    pub fn rows(&self) -> impl Iterator<Item = &NormalizedEvent> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_front_end_json() {
        let json = r#"{
            "id": 17,
            "date": "2025/01/10",
            "time": "19:30",
            "location": "Home",
            "category": "Psychological abuse",
            "content": "(sample) was yelled at during dinner.",
            "attachments": [{"type": "image", "name": "a.jpg", "size": 2048}],
            "medical": {"visitType": "ER", "proofs": ["receipt"]},
            "weather": {"temperature": 12.5, "windSpeed": 3},
            "occurredAt": "2025-01-10T19:30:00Z",
            "createdAt": 1736537400000,
            "comments": [{"text": "ignored"}]
        }"#;

        let record: IncidentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "2025/01/10");
        assert_eq!(record.attachments[0].kind, "image");
        assert_eq!(record.attachments[0].size, Some(2048));
        assert_eq!(
            record.medical.as_ref().and_then(|m| m.visit_type.as_deref()),
            Some("ER")
        );
        assert_eq!(
            record.weather.as_ref().and_then(|w| w.wind_speed),
            Some(3.0)
        );
        assert_eq!(
            record.occurred_at,
            Some(TimeValue::Text("2025-01-10T19:30:00Z".to_string()))
        );
        assert_eq!(record.created_at, Some(TimeValue::Millis(1736537400000)));
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: IncidentRecord = serde_json::from_str(r#"{"content": "x"}"#).unwrap();
        assert!(record.date.is_empty());
        assert!(record.attachments.is_empty());
        assert!(record.medical.is_none());
    }

    #[test]
    fn test_record_reads_nulls_as_empty() {
        let record: IncidentRecord = serde_json::from_str(
            r#"{
                "date": null,
                "time": null,
                "location": null,
                "category": null,
                "content": null,
                "attachments": null,
                "medical": {"diagnosis": "contusion", "proofs": null},
                "weather": null,
                "occurredAt": null
            }"#,
        )
        .unwrap();

        assert_eq!(record.date, "");
        assert_eq!(record.content, "");
        assert!(record.attachments.is_empty());
        let medical = record.medical.unwrap();
        assert!(medical.proofs.is_empty());
        assert_eq!(medical.diagnosis.as_deref(), Some("contusion"));
        assert!(record.weather.is_none());
        assert!(record.occurred_at.is_none());
    }

    #[test]
    fn test_fractional_epoch_is_accepted() {
        let record: IncidentRecord =
            serde_json::from_str(r#"{"createdAt": 1736537400000.0}"#).unwrap();
        assert_eq!(
            record.created_at,
            Some(TimeValue::FractionalMillis(1736537400000.0))
        );
    }

    #[test]
    fn test_unusable_values_read_as_absent() {
        let record: IncidentRecord = serde_json::from_str(
            r#"{
                "content": "x",
                "timestamp": {"seconds": 12},
                "createdAt": true,
                "medical": "clinic",
                "weather": [1, 2],
                "attachments": [{"type": null, "name": "a.jpg"}, {}]
            }"#,
        )
        .unwrap();

        assert!(record.timestamp.is_none());
        assert!(record.created_at.is_none());
        assert!(record.medical.is_none());
        assert!(record.weather.is_none());
        assert_eq!(record.attachments.len(), 2);
        assert_eq!(record.attachments[0].kind, "");
        assert_eq!(record.attachments[0].name, "a.jpg");
    }

    #[test]
    fn test_display_name_fallback() {
        let both = UserProfile {
            name: Some("Hanako".to_string()),
            email: Some("h@example.com".to_string()),
        };
        assert_eq!(both.display_name(), "Hanako");

        let email_only = UserProfile {
            name: Some("  ".to_string()),
            email: Some("h@example.com".to_string()),
        };
        assert_eq!(email_only.display_name(), "h@example.com");

        assert_eq!(UserProfile::default().display_name(), "");
    }

    #[test]
    fn test_plan_policy_json() {
        let policy: PlanPolicy =
            serde_json::from_str(r#"{"isFreePlan": true, "watermarkText": "PREVIEW"}"#).unwrap();
        assert!(policy.is_free_plan);
        assert_eq!(policy.watermark_text.as_deref(), Some("PREVIEW"));
        assert_eq!(policy.max_pages, None);
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Japanese);
        assert_eq!("English".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }
}
