//! JSONL event log for one validation run.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying `type`, `seq`
//! (event number within the run, starting at 0) and `timestamp` next to the
//! event payload. Lines are buffered and flushed when the run finishes.

use crossval_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const FINISHED_EVENT: &str = "pipeline_finished";

struct EventSink {
    writer: BufWriter<File>,
    next_seq: u64,
}

/// Appends the events of a single run to a `.events.jsonl` file
pub struct JsonlConversationLogger {
    sink: Mutex<EventSink>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for writing, creating parent directories.
    ///
    /// Returns `None` (after a warning) when the file cannot be created; the
    /// run then proceeds without an event log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create event log directory {}: {}", parent.display(), e);
            return None;
        }

        match File::create(path) {
            Ok(file) => Some(Self {
                sink: Mutex::new(EventSink {
                    writer: BufWriter::new(file),
                    next_seq: 0,
                }),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Logger for one run inside `dir`, named after the local start time
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = format!(
            "crossval_{}.events.jsonl",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        Self::new(dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let finished = event.event_type == FINISHED_EVENT;
        let record = Self::record(event, sink.next_seq);
        sink.next_seq += 1;

        let written = serde_json::to_writer(&mut sink.writer, &record)
            .map_err(std::io::Error::from)
            .and_then(|()| sink.writer.write_all(b"\n"));
        let flushed = if finished { sink.writer.flush() } else { Ok(()) };
        if let Err(e) = written.and(flushed) {
            warn!("Could not write event log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(sink) = self.sink.get_mut() {
            let _ = sink.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossval_domain::{FailureKind, Role, StageFailure, StageResult};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_stage_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::stage_started(0, Role::Initial, "gpt-4o"));
        let result = StageResult::new("Q?", "gpt-4o", "Paris", 12.5).for_stage(0, Role::Initial);
        logger.log(ConversationEvent::stage_succeeded(&result));
        let failure = StageFailure::new(
            1,
            Role::Summarize,
            "gemini-2.0-flash",
            FailureKind::Provider,
            "Request failed with status 503: unavailable",
        );
        logger.log(ConversationEvent::stage_failed(&failure));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        for (seq, line) in lines.iter().enumerate() {
            assert_eq!(line["seq"], seq as u64);
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "stage_started");
        assert_eq!(lines[0]["role"], "initial");
        assert_eq!(lines[1]["type"], "stage_succeeded");
        assert_eq!(lines[1]["answer"], "Paris");
        assert_eq!(lines[1]["cost"], 12.5);
        assert_eq!(lines[2]["type"], "stage_failed");
        assert_eq!(lines[2]["kind"], "provider");
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.events.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "note",
            serde_json::json!("just a string"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_jsonl_logger_flushes_when_run_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finished.events.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        let result = StageResult::new("Q?", "gpt-4o", "Paris", 1.0).for_stage(0, Role::Initial);
        let report = crossval_domain::ValidationReport::new(
            "Q?",
            vec!["gpt-4o".to_string()],
            vec![result],
            vec![],
            42,
        );
        logger.log(ConversationEvent::pipeline_finished(&report));

        // Still open: the finishing event must already be on disk
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["type"], "pipeline_finished");
        assert_eq!(lines[0]["succeeded"], 1);
        assert_eq!(lines[0]["elapsed_ms"], 42);
    }

    #[test]
    fn test_in_dir_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("runs");
        let logger = JsonlConversationLogger::in_dir(&nested).unwrap();

        assert!(nested.is_dir());
        let name = logger.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("crossval_"));
        assert!(name.ends_with(".events.jsonl"));
    }
}
