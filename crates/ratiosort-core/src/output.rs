//! Machine-readable run reports.
//!
//! A report holds one [`SortRecord`](crate::types::SortRecord) per
//! discovered file. JSON Lines reports are streamed as files are processed;
//! JSON reports are buffered and written as one array by [`OutputWriter::finish`].

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    #[default]
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// Serializes report records as JSON or JSONL.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    buffered: Vec<serde_json::Value>,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            buffered: Vec::new(),
            items_written: 0,
        }
    }

    /// Record one item. JSONL is written immediately, JSON on `finish`.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::to_value(item).map_err(io::Error::other)?;
                self.buffered.push(value);
            }
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        self.items_written += 1;
        Ok(())
    }

    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Write any buffered records, flush, and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.format == OutputFormat::Json {
            let items = std::mem::take(&mut self.buffered);
            if self.pretty {
                serde_json::to_writer_pretty(&mut self.writer, &items)
                    .map_err(io::Error::other)?;
            } else {
                serde_json::to_writer(&mut self.writer, &items).map_err(io::Error::other)?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Serialize an item to a JSON string.
pub fn to_json<T: Serialize>(item: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(item)
    } else {
        serde_json::to_string(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileOutcome, Resolution, SortRecord};
    use std::path::PathBuf;

    fn records() -> Vec<SortRecord> {
        vec![
            SortRecord::from_outcome(PathBuf::from("/in/a.jpg"), &FileOutcome::Unresolved),
            SortRecord::from_outcome(
                PathBuf::from("/in/b.jpg"),
                &FileOutcome::Rejected {
                    resolution: Resolution::new(800, 600).unwrap(),
                },
            ),
        ]
    }

    #[test]
    fn test_jsonl_streams_one_line_per_record() {
        let mut writer = OutputWriter::new(Vec::new(), OutputFormat::JsonLines, true);
        for record in records() {
            writer.write(&record).unwrap();
        }
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"outcome\":\"unresolved\""));
        assert!(lines[1].contains("\"width\":800"));
    }

    #[test]
    fn test_json_writes_single_array() {
        let mut writer = OutputWriter::new(Vec::new(), OutputFormat::Json, false);
        for record in records() {
            writer.write(&record).unwrap();
        }
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert_eq!(parsed[1]["outcome"], "rejected");
    }

    #[test]
    fn test_empty_json_report_is_empty_array() {
        let writer = OutputWriter::new(Vec::new(), OutputFormat::Json, false);
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::JsonLines.to_string(), "jsonl");
    }
}
