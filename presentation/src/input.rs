//! Question input: argument, file, or interactive prompt

use crossval_domain::Question;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("File {} is empty", .0.display())]
    EmptyFile(PathBuf),

    #[error("Error reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("No input available")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read a question file, trimming surrounding whitespace
pub fn read_question_file(path: &Path) -> Result<Question, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Question::try_new(content.trim()).map_err(|_| InputError::EmptyFile(path.to_path_buf()))
}

/// Resolve the question from CLI inputs, falling back to the prompt
pub fn resolve_question(
    argument: Option<String>,
    file: Option<&Path>,
) -> Result<Question, InputError> {
    if let Some(text) = argument {
        return Question::try_new(text.trim()).map_err(|_| InputError::EmptyQuestion);
    }
    if let Some(path) = file {
        return read_question_file(path);
    }
    let stdin = io::stdin();
    QuestionPrompt::new(stdin.lock(), io::stderr()).ask()
}

/// Interactive `[w]rite` / `[f]ile` question prompt
pub struct QuestionPrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> QuestionPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until a non-empty question is given or input ends
    pub fn ask(&mut self) -> Result<Question, InputError> {
        loop {
            let method = self.read_line("Input method: [w]rite or [f]ile [w]: ")?;
            match method.to_lowercase().as_str() {
                "" | "w" => {
                    let text = self.read_line("Enter your question: ")?;
                    match Question::try_new(text) {
                        Ok(question) => return Ok(question),
                        Err(_) => writeln!(self.writer, "Question cannot be empty.")?,
                    }
                }
                "f" => return self.ask_file(),
                _ => writeln!(
                    self.writer,
                    "Invalid choice. Please enter 'w' for Write or 'f' for File."
                )?,
            }
        }
    }

    fn ask_file(&mut self) -> Result<Question, InputError> {
        loop {
            let name = self.read_line("Enter the path to your question file: ")?;
            match read_question_file(Path::new(&name)) {
                Ok(question) => return Ok(question),
                Err(InputError::FileNotFound(_)) => {
                    writeln!(self.writer, "File {name} does not exist. Please try again.")?
                }
                Err(InputError::EmptyFile(_)) => writeln!(
                    self.writer,
                    "File is empty. Please provide a file with content."
                )?,
                Err(e) => writeln!(self.writer, "{e}")?,
            }
        }
    }
}
