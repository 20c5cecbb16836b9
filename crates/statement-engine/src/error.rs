//! Configuration errors
//!
//! Statement generation itself never fails; only building an engine from a
//! user-supplied rule table can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid pattern in fact rule '{label}': {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("Fact rule '{0}' has no patterns")]
    EmptyRule(String),

    #[error("Fact rule has an empty label")]
    EmptyLabel,
}
