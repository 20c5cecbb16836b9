//! Statement generation engine
//!
//! Turns a snapshot of free-text incident records into a formal written
//! statement: neutral per-event sentences, formal dates, evidence flags and
//! medical appendices, ordered chronologically under a header and an
//! introduction. Pagination lives in `statement-layout`.
//!
//! Generation never fails on user text. The only errors come from compiling
//! a custom rule table.

pub mod assembler;
pub mod clock;
pub mod config;
pub mod error;
pub mod evidence;
pub mod location;
pub mod medical;
pub mod normalizer;
pub mod patterns;
pub mod sequencer;
pub mod temporal;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{FactRuleSpec, MedicalPhrasing, NormalizerConfig, PhrasingConfig, StatementConfig};
pub use error::EngineError;
pub use normalizer::{normalize_sentence, TextNormalizer};

/// StatementEngine entry point
pub struct StatementEngine {
    config: StatementConfig,
    normalizer: TextNormalizer,
    clock: Box<dyn Clock>,
}

impl StatementEngine {
    /// Compile the configured rule tables; uses the system clock
    pub fn new(config: StatementConfig) -> Result<Self, EngineError> {
        let normalizer = TextNormalizer::new(&config.normalizer)?;
        tracing::debug!(
            locale = ?config.locale,
            lexemes = config.normalizer.lexemes.len(),
            fact_rules = config.normalizer.fact_rules.len(),
            "statement engine ready"
        );
        Ok(Self {
            config,
            normalizer,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the time source used for the issue date
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Neutral sentence for raw content (no date, place or notes)
    pub fn normalize(&self, content: &str) -> String {
        self.normalizer.normalize(content)
    }

    pub fn format_date(&self, raw: &str) -> String {
        temporal::format_date(raw, self.config.locale)
    }

    pub fn format_time(&self, raw: &str) -> String {
        temporal::format_time(raw, self.config.locale)
    }
}

impl Default for StatementEngine {
    fn default() -> Self {
        Self::new(StatementConfig::default()).expect("built-in configuration compiles")
    }
}
