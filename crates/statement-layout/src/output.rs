//! Output formats and file-name suggestions

use crate::config::LayoutConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format of a rendered statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Json,
    Text,
}

impl OutputFormat {
    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Json => "application/json",
            OutputFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Suggested PDF file name; free-plan previews are marked as such
pub fn suggest_file_name(config: &LayoutConfig, issued_on: NaiveDate, is_free_plan: bool) -> String {
    let date = issued_on.format("%Y-%m-%d");
    if is_free_plan {
        format!(
            "{}-{}-{}.{}",
            config.file_stem,
            config.preview_suffix,
            date,
            OutputFormat::Pdf.extension()
        )
    } else {
        format!("{}-{}.{}", config.file_stem, date, OutputFormat::Pdf.extension())
    }
}

/// Swap the extension of a suggested name for another format
pub fn file_name_for(suggested: &str, format: OutputFormat) -> String {
    Path::new(suggested)
        .with_extension(format.extension())
        .to_string_lossy()
        .into_owned()
}
