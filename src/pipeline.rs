//! The staged pipeline and its assembly. Topology:
//! `decode → date_filter → fan-out{ unit_1, unit_2, … } → merge → sink`.
//! Fan-out is a logical broadcast (every unit sees every surviving
//! message); merge is concatenation in configured unit order. Everything
//! a stage needs — matchers, execution date, format template — is bound
//! once at [`Pipeline::new`], never reconstructed per message.

use crate::message::Message;
use crate::sink::Sink;
use crate::unit::Unit;
use chrono::NaiveDate;
use eyre::{Context, Result};
use std::io::Write;

/// `(lowercased term, message_id)` — what the term filter stage emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub term: String,
    pub message_id: String,
}

pub struct Pipeline {
    units: Vec<Unit>,
    execution_date: Option<NaiveDate>,
}

impl Pipeline {
    pub fn new(units: Vec<Unit>, execution_date: Option<NaiveDate>) -> Self {
        Pipeline { units, execution_date }
    }

    /// `date_filter`: passes through unconditionally when no execution
    /// date is configured, otherwise only messages whose date matches.
    fn passes_date_filter(&self, message: &Message) -> bool {
        match self.execution_date {
            None => true,
            Some(date) => message.message_time.date_naive() == date,
        }
    }

    /// `user_filter[u] → term_filter[u]` for every configured unit, in
    /// order, concatenated. Per-unit result order follows whatever order
    /// the matcher's `query` happens to iterate its set in — unspecified.
    fn fan_out(&self, message: &Message) -> Vec<MatchResult> {
        let mut results = Vec::new();
        for unit in &self.units {
            if !unit.userset.contains(&message.node_id) {
                continue;
            }
            for term in unit.matcher.query(&message.text) {
                results.push(MatchResult {
                    term: term.to_lowercase(),
                    message_id: message.message_id.clone(),
                });
            }
        }
        results
    }

    /// Runs `decode → date_filter → fan-out` for a single message,
    /// returning whatever results (zero or more) it produces.
    pub fn process_message(&self, message: &Message) -> Vec<MatchResult> {
        if !self.passes_date_filter(message) {
            return Vec::new();
        }
        self.fan_out(message)
    }

    /// Decodes one input line; on `MalformedMessage` the line is dropped
    /// and a diagnostic is written to `diagnostics`, but the pipeline
    /// continues — this never raises the process's exit code.
    fn process_line(
        &self,
        line: &str,
        line_number: usize,
        diagnostics: &mut dyn Write,
    ) -> Vec<MatchResult> {
        match Message::parse_line(line, line_number) {
            Ok(message) => self.process_message(&message),
            Err(err) => {
                let _ = writeln!(diagnostics, "dropped malformed line {}: {}", line_number, err);
                Vec::new()
            }
        }
    }

    /// Drives every line from `lines` through the pipeline into `sink`.
    /// Output order follows input order; within one message, results are
    /// contiguous in the stream before the next message's results begin.
    /// An I/O error reading a line is fatal.
    pub fn run<I>(
        &self,
        lines: I,
        sink: &mut dyn Sink,
        diagnostics: &mut dyn Write,
    ) -> Result<()>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.wrap_err("Failed to read input line")?;
            let line_number = idx + 1;
            for result in self.process_line(&line, line_number, diagnostics) {
                sink.write(&result)?;
            }
        }
        sink.flush()
    }
}
