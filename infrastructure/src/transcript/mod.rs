//! Plain-text transcript writer.
//!
//! One file per run, named `validation_%Y%m%d_%H%M%S.txt` inside the
//! configured directory:
//!
//! ```text
//! Question: <question>
//!
//! Model: <model>
//! Timestamp: <local time>
//! Answer:
//! <answer>
//!
//! ```

use crossval_application::TranscriptSink;
use crossval_domain::StageResult;
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

/// Default output directory, relative to the working directory
pub const DEFAULT_TRANSCRIPT_DIR: &str = "outputs";

/// Writes run transcripts as text files into a directory
#[derive(Debug, Clone)]
pub struct TextTranscriptWriter {
    dir: PathBuf,
}

impl Default for TextTranscriptWriter {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_DIR)
    }
}

impl TextTranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render the transcript body
    pub fn render(results: &[StageResult]) -> String {
        let mut out = String::new();
        let Some(first) = results.first() else {
            return out;
        };

        let _ = write!(out, "Question: {}\n\n", first.question);
        for result in results {
            let _ = writeln!(out, "Model: {}", result.model_name);
            let _ = writeln!(
                out,
                "Timestamp: {}",
                result.timestamp.format("%Y-%m-%d %H:%M:%S%.6f")
            );
            let _ = write!(out, "Answer:\n{}\n\n", result.answer);
        }
        out
    }

    fn file_name() -> String {
        format!(
            "validation_{}.txt",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        )
    }
}

impl TranscriptSink for TextTranscriptWriter {
    fn save(&self, results: &[StageResult]) -> io::Result<PathBuf> {
        if results.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no results to write",
            ));
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name());
        std::fs::write(&path, Self::render(results))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossval_domain::Role;

    fn results() -> Vec<StageResult> {
        vec![
            StageResult::new("What is the capital of France?", "claude-3-5-haiku-latest", "Paris", 1.0)
                .for_stage(0, Role::Initial),
            StageResult::new("What is the capital of France?", "gemini-2.0-flash", "Paris.", 2.0)
                .for_stage(1, Role::Summarize),
        ]
    }

    #[test]
    fn test_render_layout() {
        let body = TextTranscriptWriter::render(&results());

        assert!(body.starts_with("Question: What is the capital of France?\n\nModel: claude-3-5-haiku-latest\nTimestamp: "));
        assert!(body.contains("\nAnswer:\nParis\n\nModel: gemini-2.0-flash\n"));
        assert!(body.ends_with("Answer:\nParis.\n\n"));
        assert_eq!(body.matches("Question:").count(), 1);
    }

    #[test]
    fn test_render_empty_is_empty() {
        assert!(TextTranscriptWriter::render(&[]).is_empty());
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TextTranscriptWriter::new(dir.path().join("outputs"));

        let results = results();
        let path = writer.save(&results).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("validation_"));
        assert!(name.ends_with(".txt"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, TextTranscriptWriter::render(&results));
    }

    #[test]
    fn test_save_rejects_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TextTranscriptWriter::new(dir.path());
        let err = writer.save(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
