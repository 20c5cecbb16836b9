//! Statement CLI Binary
//!
//! Generates a paginated written statement from a JSON record snapshot.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use shared_types::{Locale, PlanPolicy, UserProfile};
use statement_cli::{generate, parse_records, render, AppConfig, GenerateRequest};
use statement_layout::OutputFormat;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "statement-cli")]
#[command(version, about = "Generate a formal written statement from incident records")]
struct Args {
    /// Records JSON file (an array of records); `-` reads stdin
    #[arg(short, long)]
    records: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output language: en or ja (overrides the config file)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Author name for the header
    #[arg(long)]
    name: Option<String>,

    /// Author email, used when no name is given
    #[arg(long)]
    email: Option<String>,

    /// Free plan: one watermarked page
    #[arg(long)]
    free: bool,

    /// Watermark text for the free plan
    #[arg(long, requires = "free")]
    watermark: Option<String>,

    /// Maximum number of pages for a paid plan
    #[arg(long, conflicts_with = "free")]
    max_pages: Option<usize>,

    /// Rows per page
    #[arg(long)]
    page_capacity: Option<usize>,

    /// Issue date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    issued_on: Option<NaiveDate>,

    /// Output format: json or text
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn policy(&self) -> PlanPolicy {
        if self.free {
            PlanPolicy {
                is_free_plan: true,
                watermark_text: self.watermark.clone(),
                max_pages: Some(1),
            }
        } else {
            PlanPolicy {
                max_pages: self.max_pages,
                ..PlanPolicy::full()
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the rendered output, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting statement-cli v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path, args.locale)?,
        None => AppConfig::preset(args.locale.unwrap_or_default()),
    };

    let records = parse_records(&read_records(&args.records)?)?;
    tracing::info!(records = records.len(), locale = ?config.statement.locale, "loaded records");

    let request = GenerateRequest {
        config,
        profile: UserProfile {
            name: args.name.clone(),
            email: args.email.clone(),
        },
        policy: args.policy(),
        page_capacity: args.page_capacity,
        issued_on: args.issued_on,
    };

    let plan = generate(&records, &request)?;
    let rendered = render(&plan, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered.bytes)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                pages = rendered.page_count,
                suggested = %rendered.file_name,
                "wrote statement"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&rendered.bytes)
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    if plan.truncated {
        tracing::warn!(
            rendered = plan.rendered_events,
            total = plan.total_events,
            "statement truncated by plan policy"
        );
    }

    Ok(())
}

fn read_records(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read records from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))
}
