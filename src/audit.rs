//! Append-only audit trail of fleet events.
//!
//! Each record is one `"<timestamp>: <message>"` line. The core only ever
//! appends through [`AuditSink`]; sinks must not fail observably, so the file
//! sink reports write problems through `log` and carries on.

use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
// Width of a rendered `TIMESTAMP_FORMAT` value.
const TIMESTAMP_WIDTH: usize = 19;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single audit line.
pub struct AuditRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

impl AuditRecord {
    /// Stamp `message` with the current local time, truncated to seconds.
    pub fn now(message: impl Into<String>) -> Self {
        let now = Local::now().naive_local();
        let timestamp = now.with_nanosecond(0).unwrap_or(now);
        Self {
            timestamp,
            message: message.into(),
        }
    }

    fn parse_line(line: &str) -> Option<Self> {
        let stamp = line.get(..TIMESTAMP_WIDTH)?;
        let message = line.get(TIMESTAMP_WIDTH..)?.strip_prefix(": ")?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self {
            timestamp,
            message: message.to_string(),
        })
    }
}

// A record always renders as exactly one line; embedded line breaks are
// escaped.
impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.timestamp.format(TIMESTAMP_FORMAT))?;
        for ch in self.message.chars() {
            match ch {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

/// Destination for audit records.
pub trait AuditSink {
    fn append(&mut self, record: &AuditRecord);
}

/// Appends lines to a text file, opening and closing it on every write.
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, record: &AuditRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{record}")
    }
}

impl AuditSink for FileAuditSink {
    fn append(&mut self, record: &AuditRecord) {
        if let Err(err) = self.write_line(record) {
            log::warn!(
                "dropping audit record for {}: {err}",
                self.path.display()
            );
        }
    }
}

/// Keeps records in memory; useful when no log file is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    records: Vec<AuditRecord>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Messages without timestamps, in append order.
    pub fn messages(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.message.as_str()).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&mut self, record: &AuditRecord) {
        self.records.push(record.clone());
    }
}

/// Errors raised while reading an audit log back.
#[derive(Debug)]
pub enum AuditReadError {
    Io(std::io::Error),
    Malformed { line: usize, content: String },
}

impl fmt::Display for AuditReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditReadError::Io(err) => write!(f, "failed to read audit log: {err}"),
            AuditReadError::Malformed { line, content } => {
                write!(f, "line {line}: malformed audit record '{content}'")
            }
        }
    }
}

impl std::error::Error for AuditReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditReadError::Io(err) => Some(err),
            AuditReadError::Malformed { .. } => None,
        }
    }
}

/// Parse an audit log. Blank lines are skipped; errors carry the 1-based
/// line number.
pub fn read_audit_records<R: BufRead>(reader: R) -> Result<Vec<AuditRecord>, AuditReadError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(AuditReadError::Io)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        let record = AuditRecord::parse_line(trimmed).ok_or_else(|| AuditReadError::Malformed {
            line: idx + 1,
            content: trimmed.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn at(stamp: &str, message: &str) -> AuditRecord {
        AuditRecord {
            timestamp: NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).unwrap(),
            message: message.to_string(),
        }
    }

    #[test]
    fn renders_timestamp_prefix() {
        let record = at("2024-03-01 09:15:00", "Added Sedan");
        assert_eq!(record.to_string(), "2024-03-01 09:15:00: Added Sedan");
    }

    #[test]
    fn reads_back_rendered_lines_and_skips_blanks() {
        let first = at("2024-03-01 09:15:00", "Added Sedan");
        let second = at("2024-03-01 09:16:30", "An error occurred while repairing T8: seized: bolt");
        let log = format!("{first}\n\n{second}\n");
        let records = read_audit_records(BufReader::new(Cursor::new(log))).unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn line_breaks_in_messages_stay_on_one_line() {
        let record = at("2024-03-01 09:15:00", "Added Sedan\nforged line\r");
        let rendered = record.to_string();
        assert_eq!(rendered, "2024-03-01 09:15:00: Added Sedan\\nforged line\\r");
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn reports_malformed_line_number() {
        let log = "2024-03-01 09:15:00: Added Sedan\nnot a record\n";
        let err = read_audit_records(BufReader::new(Cursor::new(log))).unwrap_err();
        match err {
            AuditReadError::Malformed { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "not a record");
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn now_truncates_to_whole_seconds() {
        let record = AuditRecord::now("tick");
        let rendered = record.to_string();
        let parsed = read_audit_records(BufReader::new(Cursor::new(rendered))).unwrap();
        assert_eq!(parsed, vec![record]);
    }

    #[test]
    fn memory_sink_keeps_append_order() {
        let mut sink = MemoryAuditSink::new();
        sink.append(&AuditRecord::now("one"));
        sink.append(&AuditRecord::now("two"));
        assert_eq!(sink.messages(), vec!["one", "two"]);
    }
}
