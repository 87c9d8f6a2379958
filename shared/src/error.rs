//! Error type of the shared crate.

use thiserror::Error;

/// Failures of the fallible parts of the TOC core.
///
/// Layout reads never fail: a missing element simply yields no geometry.
#[derive(Debug, Error)]
pub enum TocError {
    /// Configuration JSON did not parse.
    #[error("failed to parse toc config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// Configuration parsed but holds values the engine cannot use.
    #[error("invalid toc config: {0}")]
    InvalidConfig(String),
}
