//! Domain error types. Per-line/per-record failures use this crate's own
//! type (cheap to match on, carries the context callers need); everything
//! that crosses the CLI boundary is wrapped in `eyre::Result` with
//! `.wrap_err(...)` context.

use thiserror::Error;

/// Failure to parse one input line into a [`crate::message::Message`].
/// Recovered locally by the decode stage: the line is dropped and a
/// diagnostic is written to stderr; the pipeline continues.
#[derive(Error, Debug)]
#[error("malformed message at line {line}: {source}")]
pub struct MessageError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}
