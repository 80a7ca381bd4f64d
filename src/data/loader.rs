use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AnswerLabel, NewQuestion};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// One row of the question sheet, before cleaning.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    question: Value,
    #[serde(default)]
    subject: Value,
    #[serde(default)]
    r#use: Value,
    #[serde(default)]
    correct: Value,
    #[serde(rename = "responseA", default)]
    response_a: Value,
    #[serde(rename = "responseB", default)]
    response_b: Value,
    #[serde(rename = "responseC", default)]
    response_c: Value,
    #[serde(rename = "responseD", default)]
    response_d: Value,
}

/// Any cell as trimmed text; blanks become the empty string.
fn clean_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

impl RawRow {
    fn into_question(self, row: usize) -> Result<NewQuestion, LoadError> {
        let correct = clean_value(&self.correct);
        let correct = correct
            .parse::<AnswerLabel>()
            .map_err(|err| LoadError::InvalidRow {
                row,
                reason: err.to_string(),
            })?;

        Ok(NewQuestion {
            question: clean_value(&self.question),
            subject: clean_value(&self.subject),
            r#use: clean_value(&self.r#use),
            correct,
            responses: [
                clean_value(&self.response_a),
                clean_value(&self.response_b),
                clean_value(&self.response_c),
                clean_value(&self.response_d),
            ],
        })
    }
}

fn into_questions(rows: Vec<RawRow>) -> Result<Vec<NewQuestion>, LoadError> {
    // Row numbers are 1-based to match the sheet.
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_question(i + 1))
        .collect()
}

/// Read a question sheet exported as a JSON array of row objects.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<NewQuestion>, LoadError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rows: Vec<RawRow> = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    into_questions(rows)
}
