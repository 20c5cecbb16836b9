//! Statement layout
//!
//! Paginates a `StatementDocument` into a `RenderPlan` and applies the plan
//! policy (page limits, watermarks). Rendering the plan to PDF happens behind
//! the `DocumentRenderer` trait.

pub mod config;
pub mod output;
pub mod paginator;
pub mod renderer;

pub use config::{LayoutConfig, DEFAULT_PAGE_CAPACITY};
pub use output::{suggest_file_name, OutputFormat};
pub use paginator::Paginator;
pub use renderer::{DocumentRenderer, JsonRenderer, RenderError, RenderedDocument, TextRenderer};
