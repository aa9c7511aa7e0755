//! JSON output adapter.

use anyhow::Result;
use derma_scan_core::{ResultOutput, ScreeningRecord};
use std::io::{self, Write};
use std::sync::Mutex;

/// How records are rendered on the wire.
#[derive(Debug, Clone, Copy)]
pub enum JsonMode {
    /// One JSON object per line, emitted as records arrive.
    Lines,
    /// Records buffered and emitted as a single array on flush.
    Array {
        /// Pretty-print the array.
        pretty: bool,
    },
}

/// JSON output adapter writing JSONL or a single array.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    mode: JsonMode,
    buffer: Mutex<Vec<ScreeningRecord>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(mode: JsonMode) -> Self {
        Self::new(Box::new(io::stdout()), mode)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, mode: JsonMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            mode,
            buffer: Mutex::new(Vec::new()),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, record: &ScreeningRecord) -> Result<()> {
        match self.mode {
            JsonMode::Lines => self.write_line(&serde_json::to_string(record)?),
            JsonMode::Array { .. } => {
                self.buffer
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                    .push(record.clone());
                Ok(())
            }
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let JsonMode::Array { pretty } = self.mode {
            let records = std::mem::take(
                &mut *self
                    .buffer
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            self.write_line(&json)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use derma_scan_core::interpret;
    use std::sync::Arc;

    /// Writer handing a shared byte buffer back to the test.
    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Vec::new())))
        }

        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(path: &str, probability: f32) -> ScreeningRecord {
        ScreeningRecord::new(path, "2026-01-01T00:00:00Z", &interpret(probability), "advice")
    }

    #[test]
    fn test_lines_mode_emits_one_object_per_line() {
        let buf = SharedBuf::new();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonMode::Lines);

        output.write(&record("a.jpg", 0.9)).unwrap();
        output.write(&record("b.jpg", 0.1)).unwrap();
        output.flush().unwrap();

        let lines: Vec<_> = buf.contents().lines().map(String::from).collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(parsed.is_object());
        }
    }

    #[test]
    fn test_array_mode_buffers_until_flush() {
        let buf = SharedBuf::new();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonMode::Array { pretty: false });

        output.write(&record("a.jpg", 0.9)).unwrap();
        assert!(buf.contents().is_empty(), "nothing written before flush");

        output.write(&record("b.jpg", 0.1)).unwrap();
        output.flush().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["path"], "a.jpg");
        assert_eq!(records[1]["label"], "benign");
    }

    #[test]
    fn test_pretty_array_is_indented() {
        let buf = SharedBuf::new();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonMode::Array { pretty: true });

        output.write(&record("a.jpg", 0.7)).unwrap();
        output.flush().unwrap();

        let text = buf.contents();
        assert!(text.contains("  \"path\""));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }
}
