#![warn(missing_docs)]
//! Test doubles and logging sinks for interaction worldtests.

mod recording;
mod users;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use recording::*;
pub use users::*;

/// One line of a worldtest event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Position of the record in the log.
    pub seq: u64,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    next_seq: u64,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file, next_seq: 0 })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.next_seq = self.next_seq.max(event.seq + 1);
        Ok(())
    }

    /// Append every call in order, numbering them after what is already logged.
    pub fn write_calls(&mut self, calls: &[WorldCall]) -> Result<()> {
        for call in calls {
            let payload = serde_json::to_string(call)?;
            self.write(&EventRecord {
                seq: self.next_seq,
                kind: call.label(),
                payload: &payload,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineward_core::{Block, Position};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_numbers_calls() {
        let path = std::env::temp_dir().join(format!(
            "mineward-calls-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let pos = Position::new(1, 2, 3);
        let calls = vec![
            WorldCall::Read { pos },
            WorldCall::SetBlock {
                pos,
                block: Block::AIR,
            },
        ];
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write_calls(&calls).expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"seq\":0"));
        assert!(lines[1].contains("\"seq\":1"));
        assert!(lines[1].contains("set_block"));
    }
}
