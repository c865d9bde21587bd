//! Sink adapters. The default sink renders each result through a
//! named-placeholder template and writes it to stdout; a secondary,
//! disabled-by-default sink appends to a relational table.

use crate::pipeline::MatchResult;
use eyre::{Context, Result};
use rusqlite::Connection;
use std::io::Write;

/// Where `term`/`message_id` records end up. Implementations must be
/// fail-fast: a write error is fatal and aborts the pipeline after the
/// current message's already-produced records are flushed.
pub trait Sink {
    fn write(&mut self, result: &MatchResult) -> Result<()>;
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Renders `"{term}, {message_id}"` (or whatever template is configured)
/// via simple named-placeholder substitution — no arbitrary expression
/// evaluation — one line per result, to the given writer.
pub struct FormatSink<W: Write> {
    template: String,
    writer: W,
}

impl<W: Write> FormatSink<W> {
    pub fn new(template: String, writer: W) -> Self {
        FormatSink { template, writer }
    }

    fn render(&self, result: &MatchResult) -> String {
        self.template
            .replace("{term}", &result.term)
            .replace("{message_id}", &result.message_id)
    }
}

impl<W: Write> Sink for FormatSink<W> {
    fn write(&mut self, result: &MatchResult) -> Result<()> {
        writeln!(self.writer, "{}", self.render(result)).wrap_err("Failed to write sink record")
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().wrap_err("Failed to flush sink")
    }
}

/// Relational sink: `results(id autoincrement, term, message_id,
/// created_on = today)`. Disabled by default; enabled when a `db_uri`
/// path is configured.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).wrap_err("Failed to open sink database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT(255) NOT NULL,
                message_id TEXT(255) NOT NULL,
                created_on DATE NOT NULL DEFAULT (date('now'))
            );",
        )
        .wrap_err("Failed to create results table")?;
        Ok(SqliteSink { conn })
    }
}

impl Sink for SqliteSink {
    fn write(&mut self, result: &MatchResult) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO results (term, message_id) VALUES (?1, ?2)",
                (&result.term, &result.message_id),
            )
            .wrap_err("Failed to insert sink record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_renders_term_and_message_id() {
        let mut buf = Vec::new();
        let mut sink = FormatSink::new("{term}, {message_id}".to_string(), &mut buf);
        sink.write(&MatchResult { term: "reminder".to_string(), message_id: "42".to_string() })
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "reminder, 42\n");
    }

    #[test]
    fn custom_template_is_respected() {
        let mut buf = Vec::new();
        let mut sink = FormatSink::new("{message_id}:{term}".to_string(), &mut buf);
        sink.write(&MatchResult { term: "law".to_string(), message_id: "7".to_string() }).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "7:law\n");
    }

    #[test]
    fn sqlite_sink_persists_rows() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let mut sink = SqliteSink::open(path).unwrap();
        sink.write(&MatchResult { term: "law".to_string(), message_id: "1".to_string() }).unwrap();

        let conn = Connection::open(path).unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }
}
