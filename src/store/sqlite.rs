use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::models::{AnswerLabel, NewQuestion, Question};

use super::{QuestionStore, StoreError, StoreStats};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    subject VARCHAR(100) NOT NULL,
    "use" VARCHAR(100) NOT NULL,
    correct VARCHAR(1) NOT NULL,
    responseA TEXT NOT NULL,
    responseB TEXT,
    responseC TEXT,
    responseD TEXT
);
CREATE INDEX IF NOT EXISTS ix_questions_subject ON questions (subject);
CREATE INDEX IF NOT EXISTS ix_questions_use ON questions ("use");
"#;

const INSERT: &str = r#"INSERT INTO questions
    (question, subject, "use", correct, responseA, responseB, responseC, responseD)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#;

/// Keeps every filter query well below SQLite's bound-parameter limit.
const SUBJECTS_PER_QUERY: usize = 500;

const SELECT_COLUMNS: &str =
    r#"SELECT id, question, subject, "use", correct, responseA, responseB, responseC, responseD"#;

/// Row exactly as stored; `correct` is validated after the read.
struct RawQuestion {
    id: i64,
    question: String,
    subject: String,
    r#use: String,
    correct: String,
    responses: [Option<String>; 4],
}

impl RawQuestion {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            question: row.get(1)?,
            subject: row.get(2)?,
            r#use: row.get(3)?,
            correct: row.get(4)?,
            responses: [row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?],
        })
    }

    fn into_question(self) -> Result<Question, StoreError> {
        let correct = self
            .correct
            .parse::<AnswerLabel>()
            .map_err(|err| StoreError::Corrupt {
                id: self.id,
                reason: err.to_string(),
            })?;
        Ok(Question {
            id: self.id,
            question: self.question,
            subject: self.subject,
            r#use: self.r#use,
            correct,
            responses: self.responses.map(Option::unwrap_or_default),
        })
    }
}

/// SQLite-backed store; one connection guarded by a mutex.
pub struct SqliteQuestionStore {
    conn: Mutex<Connection>,
}

impl SqliteQuestionStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let conn = self.conn.lock();
        let raw = conn
            .query_row(
                &format!("{SELECT_COLUMNS} FROM questions WHERE id = ?1"),
                params![id],
                RawQuestion::from_row,
            )
            .optional()?;
        raw.map(RawQuestion::into_question).transpose()
    }
}

fn insert(conn: &Connection, question: &NewQuestion) -> rusqlite::Result<i64> {
    let [a, b, c, d] = &question.responses;
    conn.execute(
        INSERT,
        params![
            question.question,
            question.subject,
            question.r#use,
            question.correct.as_str(),
            a,
            b,
            c,
            d
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn distinct(conn: &Connection, column: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {column} FROM questions ORDER BY {column}"
    ))?;
    let values = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(values)
}

impl QuestionStore for SqliteQuestionStore {
    fn find_by_use_and_subjects(
        &self,
        r#use: &str,
        subjects: &[String],
    ) -> Result<Vec<Question>, StoreError> {
        let conn = self.conn.lock();
        let mut rows = Vec::new();
        for chunk in subjects.chunks(SUBJECTS_PER_QUERY) {
            let placeholders = (0..chunk.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                r#"{SELECT_COLUMNS} FROM questions WHERE "use" = ?1 AND subject IN ({placeholders})"#
            );

            let mut stmt = conn.prepare(&sql)?;
            let values = std::iter::once(r#use).chain(chunk.iter().map(String::as_str));
            let found = stmt
                .query_map(params_from_iter(values), RawQuestion::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.extend(found);
        }
        rows.sort_by_key(|row| row.id);
        rows.dedup_by_key(|row| row.id);

        rows.into_iter().map(RawQuestion::into_question).collect()
    }

    fn append(&self, question: NewQuestion) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        Ok(insert(&conn, &question)?)
    }

    fn replace_all(&self, questions: Vec<NewQuestion>) -> Result<usize, StoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM questions", [])?;
        for question in &questions {
            insert(&tx, question)?;
        }
        tx.commit()?;
        Ok(questions.len())
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let conn = self.conn.lock();
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(StoreStats {
            total: total as usize,
            subjects: distinct(&conn, "subject")?,
            uses: distinct(&conn, r#""use""#)?,
        })
    }
}
