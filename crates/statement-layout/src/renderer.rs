//! Renderer seam
//!
//! The PDF renderer lives outside this workspace and consumes a `RenderPlan`
//! through `DocumentRenderer`. Two in-tree renderers cover machine-readable
//! output and a plain-text preview.

use crate::output::{file_name_for, OutputFormat};
use shared_types::{RenderPage, RenderPlan};
use std::fmt::Write as _;
use thiserror::Error;

/// Errors raised while rendering a plan
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render plan has no pages")]
    EmptyPlan,

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render failed: {0}")]
    Failed(String),
}

/// Bytes produced by a renderer, with their format
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub file_name: String,
    pub page_count: usize,
}

impl RenderedDocument {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Turns a render plan into an output document
pub trait DocumentRenderer {
    fn format(&self) -> OutputFormat;

    fn render(&self, plan: &RenderPlan) -> Result<RenderedDocument, RenderError>;
}

/// Pretty-printed JSON of the plan itself
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, plan: &RenderPlan) -> Result<RenderedDocument, RenderError> {
        if plan.pages.is_empty() {
            return Err(RenderError::EmptyPlan);
        }
        let bytes = serde_json::to_vec_pretty(plan)?;
        Ok(RenderedDocument {
            bytes,
            format: self.format(),
            file_name: file_name_for(&plan.suggested_file_name, self.format()),
            page_count: plan.page_count(),
        })
    }
}

/// Plain-text page dump for proofreading before the PDF is produced
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, plan: &RenderPlan) -> Result<RenderedDocument, RenderError> {
        if plan.pages.is_empty() {
            return Err(RenderError::EmptyPlan);
        }

        let mut out = String::new();
        for page in &plan.pages {
            write_page(&mut out, plan, page).map_err(|e| RenderError::Failed(e.to_string()))?;
        }

        Ok(RenderedDocument {
            bytes: out.into_bytes(),
            format: self.format(),
            file_name: file_name_for(&plan.suggested_file_name, self.format()),
            page_count: plan.page_count(),
        })
    }
}

fn write_page(out: &mut String, plan: &RenderPlan, page: &RenderPage) -> std::fmt::Result {
    writeln!(out, "=== Page {}/{} ===", page.page_number, plan.page_count())?;
    if let Some(watermark) = &page.watermark {
        writeln!(out, "[{}]", watermark)?;
    }
    if let Some(header) = &page.header_block {
        writeln!(out, "{}", header.title)?;
        writeln!(out, "{}", header.court)?;
        writeln!(out, "{}", header.issue_date)?;
        writeln!(out, "{}", header.author)?;
    }
    if let Some(title) = &page.title {
        writeln!(out, "{}", title)?;
    }
    if let Some(intro) = &page.intro_block {
        writeln!(out)?;
        writeln!(out, "{}", intro)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", plan.columns.join(" | "))?;
    for row in &page.rows {
        let when = [row.date.as_str(), row.time.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let mark = if row.evidence { plan.evidence_mark.as_str() } else { "" };
        writeln!(
            out,
            "{} | {} | {} | {} | {}",
            when, row.location, row.category, row.detail, mark
        )?;
    }

    if let Some(closing) = &page.closing_section {
        writeln!(out)?;
        writeln!(out, "{}", closing.heading)?;
        writeln!(out, "{}", closing.hint)?;
    }
    writeln!(out)
}
