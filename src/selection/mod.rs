//! Random, answer-free question draws.
//!
//! A draw filters the store on test type and subjects, refuses to return a
//! partial set, samples without replacement and redacts the correct answer.

mod sampler;

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::models::QuestionView;
use crate::protocol::SelectionRequest;
use crate::store::{QuestionStore, StoreError};

pub use sampler::{Sampler, SeededSampler, ThreadRngSampler};

/// Upper bound on the subjects accepted in one request.
pub const MAX_SUBJECTS: usize = 100;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Limit must be 5, 10, or 20 (got {0})")]
    InvalidLimit(i64),
    #[error("At least one subject is required")]
    NoSubjects,
    #[error("subjects: at most {max} may be requested (got {count})")]
    TooManySubjects { count: usize, max: usize },
    #[error("Test type (use) must not be empty")]
    EmptyUse,
    #[error(
        "Not enough questions found. Only {available} available, but {requested} requested."
    )]
    InsufficientData { available: usize, requested: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The allowed sizes of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionLimit {
    Five,
    Ten,
    Twenty,
}

impl QuestionLimit {
    pub fn get(self) -> usize {
        match self {
            QuestionLimit::Five => 5,
            QuestionLimit::Ten => 10,
            QuestionLimit::Twenty => 20,
        }
    }
}

impl TryFrom<i64> for QuestionLimit {
    type Error = SelectionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(QuestionLimit::Five),
            10 => Ok(QuestionLimit::Ten),
            20 => Ok(QuestionLimit::Twenty),
            other => Err(SelectionError::InvalidLimit(other)),
        }
    }
}

/// A validated selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub r#use: String,
    pub subjects: Vec<String>,
    pub limit: QuestionLimit,
}

impl SelectionRequest {
    /// Check the request before anything touches the store.
    ///
    /// `use` and subjects are trimmed; blank subjects and duplicates are dropped.
    pub fn validate(&self) -> Result<SelectionCriteria, SelectionError> {
        let limit = QuestionLimit::try_from(self.limit)?;

        let r#use = self.r#use.trim();
        if r#use.is_empty() {
            return Err(SelectionError::EmptyUse);
        }

        if self.subjects.len() > MAX_SUBJECTS {
            return Err(SelectionError::TooManySubjects {
                count: self.subjects.len(),
                max: MAX_SUBJECTS,
            });
        }

        let mut seen = HashSet::with_capacity(self.subjects.len());
        let subjects: Vec<String> = self
            .subjects
            .iter()
            .map(|subject| subject.trim())
            .filter(|subject| !subject.is_empty() && seen.insert(*subject))
            .map(str::to_string)
            .collect();
        if subjects.is_empty() {
            return Err(SelectionError::NoSubjects);
        }

        Ok(SelectionCriteria {
            r#use: r#use.to_string(),
            subjects,
            limit,
        })
    }
}

/// Outcome of a successful draw.
#[derive(Debug, Clone)]
pub struct Selection {
    pub questions: Vec<QuestionView>,
    pub total_returned: usize,
}

/// Draw `criteria.limit` distinct questions matching the criteria.
pub fn select_random(
    store: &dyn QuestionStore,
    sampler: &dyn Sampler,
    criteria: &SelectionCriteria,
) -> Result<Selection, SelectionError> {
    let candidates = store.find_by_use_and_subjects(&criteria.r#use, &criteria.subjects)?;
    let requested = criteria.limit.get();

    if candidates.len() < requested {
        return Err(SelectionError::InsufficientData {
            available: candidates.len(),
            requested,
        });
    }

    let questions: Vec<QuestionView> = sampler
        .sample(candidates.len(), requested)
        .into_iter()
        .map(|index| QuestionView::from(&candidates[index]))
        .collect();

    debug!(
        test_type = %criteria.r#use,
        candidates = candidates.len(),
        returned = questions.len(),
        "drew random questions"
    );

    Ok(Selection {
        total_returned: questions.len(),
        questions,
    })
}
