//! Destinations for the lines each role emits.
//!
//! Both roles share one sink. The alternation protocol already serializes
//! emission, so a sink only has to make each line visible before the
//! emitting role posts its peer's turn.

use parking_lot::Mutex;
use std::io::{self, Write};

/// Receives one line per turn.
pub trait LineSink: Sync {
    /// Writes `line` followed by a newline and makes it visible.
    fn emit(&self, line: &str) -> io::Result<()>;
}

/// Writes lines to standard output, flushing after each one.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    /// Creates a stdout sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LineSink for StdoutSink {
    fn emit(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Records lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines emitted so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// All lines joined as they would appear on stdout.
    #[must_use]
    pub fn transcript(&self) -> String {
        let lines = self.lines.lock();
        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl LineSink for MemorySink {
    fn emit(&self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn memory_sink_records_lines_in_order() {
        init_test("memory_sink_records_lines_in_order");
        let sink = MemorySink::new();
        crate::assert_with_log!(sink.is_empty(), "starts empty", true, sink.is_empty());
        sink.emit("routine").expect("emit");
        sink.emit("main").expect("emit");
        crate::assert_with_log!(sink.len() == 2, "two lines", 2usize, sink.len());
        assert_eq!(sink.lines(), vec!["routine".to_string(), "main".to_string()]);
        let transcript = sink.transcript();
        crate::assert_with_log!(
            transcript == "routine\nmain\n",
            "transcript",
            "routine\nmain\n",
            transcript
        );
        crate::test_complete!("memory_sink_records_lines_in_order");
    }

    #[test]
    fn lines_are_data_not_format_strings() {
        init_test("lines_are_data_not_format_strings");
        let sink = MemorySink::new();
        sink.emit("%s {} %n").expect("emit");
        let transcript = sink.transcript();
        crate::assert_with_log!(
            transcript == "%s {} %n\n",
            "verbatim",
            "%s {} %n\n",
            transcript
        );
        crate::test_complete!("lines_are_data_not_format_strings");
    }
}
