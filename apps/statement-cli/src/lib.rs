//! Statement CLI library
//!
//! Wires the engine and the paginator together for the command-line front
//! end: records JSON in, rendered plan out.

pub mod config;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use shared_types::{IncidentRecord, PlanPolicy, RenderPlan, UserProfile};
use statement_engine::{FixedClock, StatementEngine};
use statement_layout::{
    DocumentRenderer, JsonRenderer, OutputFormat, Paginator, RenderedDocument, TextRenderer,
};

pub use config::AppConfig;

/// Everything one generation run needs besides the records
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub config: AppConfig,
    pub profile: UserProfile,
    pub policy: PlanPolicy,
    pub page_capacity: Option<usize>,
    /// Fixed issue date; the system clock is used when absent
    pub issued_on: Option<NaiveDate>,
}

/// Parse a record snapshot: a JSON array of records
///
/// Entries that are not record objects are skipped with a warning.
pub fn parse_records(json: &str) -> anyhow::Result<Vec<IncidentRecord>> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Failed to parse records JSON")?;

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect())
}

/// Run the engine and paginator over `records`
pub fn generate(records: &[IncidentRecord], request: &GenerateRequest) -> anyhow::Result<RenderPlan> {
    let mut engine = StatementEngine::new(request.config.statement.clone())
        .context("Invalid statement configuration")?;

    if let Some(date) = request.issued_on {
        // Noon local time, so the configured offset cannot move the date
        let offset = Duration::minutes(i64::from(request.config.statement.utc_offset_minutes));
        let noon = date
            .and_hms_opt(12, 0, 0)
            .context("Invalid issue date")?
            .and_utc()
            - offset;
        engine = engine.with_clock(FixedClock(noon));
    }

    let document = engine.assemble(records, &request.profile);
    let paginator = Paginator::new(request.config.layout.clone());
    Ok(paginator.paginate(&document, request.page_capacity, &request.policy))
}

/// Render `plan` in the requested format
pub fn render(plan: &RenderPlan, format: OutputFormat) -> anyhow::Result<RenderedDocument> {
    let rendered = match format {
        OutputFormat::Json => JsonRenderer.render(plan)?,
        OutputFormat::Text => TextRenderer.render(plan)?,
        OutputFormat::Pdf => anyhow::bail!(
            "PDF output is produced by an external renderer; use --format json and pass the plan on"
        ),
    };
    tracing::debug!(
        format = %rendered.format,
        bytes = rendered.bytes.len(),
        file_name = %rendered.file_name,
        "rendered plan"
    );
    Ok(rendered)
}
