//! # question-bank
//!
//! Serves random multiple choice questions for assessment tests.
//!
//! Questions are tagged with a subject and a test type (`use`). Registered
//! users draw a random subset matching a test type and a list of subjects;
//! the correct answer is never part of a draw. An administrator can add new
//! questions, and whole sheets can be bulk imported.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use question_bank::protocol::SelectionRequest;
//! use question_bank::selection::{select_random, ThreadRngSampler};
//! use question_bank::store::SqliteQuestionStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteQuestionStore::open("questionnaire.db")?;
//!     store.ensure_schema()?;
//!
//!     let request = SelectionRequest {
//!         r#use: "Positioning test".to_string(),
//!         subjects: vec!["Databases".to_string()],
//!         limit: 5,
//!     };
//!     let selection = select_random(&store, &ThreadRngSampler, &request.validate()?)?;
//!     println!("{} questions", selection.total_returned);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod data;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod selection;
pub mod server;
pub mod store;

pub use config::Settings;
pub use models::{AnswerLabel, NewQuestion, Question, QuestionView};
