// Error types for the few fallible surfaces of the crate.
//
// The navigation core itself never fails: every per-tick operation reports a
// `Status` or an empty result. Only configuration loading touches the
// filesystem and a parser, so that is the only place an error type appears.

use thiserror::Error;

/// Failure while loading a `NavConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The config text is not valid JSON for `NavConfig`.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
