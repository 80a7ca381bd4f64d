use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::models::{NewQuestion, Question};

use super::{QuestionStore, StoreError, StoreStats};

struct Inner {
    questions: Vec<Question>,
    next_id: i64,
}

/// Vector-backed store. Ids start at 1 and are never reused.
pub struct InMemoryQuestionStore {
    inner: RwLock<Inner>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                questions: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn with_questions(questions: Vec<NewQuestion>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for question in questions {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.questions.push(question.with_id(id));
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.inner.read().questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionStore for InMemoryQuestionStore {
    fn find_by_use_and_subjects(
        &self,
        r#use: &str,
        subjects: &[String],
    ) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.r#use == r#use && subjects.iter().any(|s| *s == q.subject))
            .cloned()
            .collect())
    }

    fn append(&self, question: NewQuestion) -> Result<i64, StoreError> {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.questions.push(question.with_id(id));
        Ok(id)
    }

    fn replace_all(&self, questions: Vec<NewQuestion>) -> Result<usize, StoreError> {
        let mut inner = self.inner.write();
        inner.questions.clear();
        let count = questions.len();
        for question in questions {
            let id = inner.next_id;
            inner.next_id += 1;
            inner.questions.push(question.with_id(id));
        }
        Ok(count)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let inner = self.inner.read();
        let subjects: BTreeSet<_> = inner.questions.iter().map(|q| q.subject.clone()).collect();
        let uses: BTreeSet<_> = inner.questions.iter().map(|q| q.r#use.clone()).collect();
        Ok(StoreStats {
            total: inner.questions.len(),
            subjects: subjects.into_iter().collect(),
            uses: uses.into_iter().collect(),
        })
    }
}
