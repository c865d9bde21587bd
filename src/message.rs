//! The message schema. One JSON object per input line deserializes into
//! an immutable [`Message`]; unknown fields are ignored, and a
//! missing/ill-typed required field raises [`MessageError`].

use crate::error::MessageError;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Format used by the upstream feed for `message_time`, e.g.
/// `Mon Apr 08 19:45:35 +0000 2019`.
const MESSAGE_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub text: String,
    pub node_id: String,
    pub message_id: String,
    #[serde(deserialize_with = "deserialize_message_time")]
    pub message_time: DateTime<FixedOffset>,
}

fn deserialize_message_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_str(&raw, MESSAGE_TIME_FORMAT).map_err(serde::de::Error::custom)
}

impl Message {
    /// Parses one input line (line numbers are 1-based, matching how
    /// diagnostics are usually reported to a human).
    pub fn parse_line(line: &str, line_number: usize) -> Result<Message, MessageError> {
        serde_json::from_str(line).map_err(|source| MessageError { line: line_number, source })
    }
}
