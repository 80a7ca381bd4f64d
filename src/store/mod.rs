//! Question persistence.
//!
//! The selection and ingestion paths only see the [`QuestionStore`] trait;
//! SQLite backs the server and an in-memory vector backs tests.

mod memory;
mod sqlite;

use thiserror::Error;

use crate::models::{NewQuestion, Question};

pub use memory::InMemoryQuestionStore;
pub use sqlite::SqliteQuestionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),
    #[error("question {id} is corrupt: {reason}")]
    Corrupt { id: i64, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Summary of what the store currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    /// Distinct subjects, sorted.
    pub subjects: Vec<String>,
    /// Distinct test types, sorted.
    pub uses: Vec<String>,
}

pub trait QuestionStore: Send + Sync {
    /// Questions whose `use` equals `r#use` and whose subject is one of `subjects`.
    fn find_by_use_and_subjects(
        &self,
        r#use: &str,
        subjects: &[String],
    ) -> Result<Vec<Question>, StoreError>;

    /// Persist a question and return its new id.
    fn append(&self, question: NewQuestion) -> Result<i64, StoreError>;

    /// Drop every stored question and insert `questions` in one step.
    fn replace_all(&self, questions: Vec<NewQuestion>) -> Result<usize, StoreError>;

    fn stats(&self) -> Result<StoreStats, StoreError>;
}
