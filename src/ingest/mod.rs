//! Validation and storage of administrator-submitted questions.

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{AnswerLabel, NewQuestion};
use crate::protocol::{CREATED_MESSAGE, CreateQuestionRequest, CreateQuestionResponse};
use crate::store::{QuestionStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("Field 'correct' must be A, B, C, or D (got {0:?})")]
    InvalidCorrect(String),
    #[error("Field 'correct' names option {0}, which has no text")]
    CorrectOptionMissing(AnswerLabel),
}

impl ValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::InvalidCorrect(_) | ValidationError::CorrectOptionMissing(_) => {
                "correct"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How strictly submissions are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestPolicy {
    /// Reject submissions whose `correct` option has no text.
    pub require_correct_option: bool,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Turn a raw submission into a question ready for the store.
///
/// Text fields are trimmed; missing optional answers become empty strings.
pub fn validate_and_build(
    request: &CreateQuestionRequest,
    policy: IngestPolicy,
) -> Result<NewQuestion, ValidationError> {
    let question = required(&request.question, "question")?;
    let subject = required(&request.subject, "subject")?;
    let r#use = required(&request.r#use, "use")?;
    let correct = request
        .correct
        .parse::<AnswerLabel>()
        .map_err(|_| ValidationError::InvalidCorrect(request.correct.clone()))?;
    let response_a = required(&request.response_a, "responseA")?;

    let built = NewQuestion {
        question,
        subject,
        r#use,
        correct,
        responses: [
            response_a,
            optional(request.response_b.as_deref()),
            optional(request.response_c.as_deref()),
            optional(request.response_d.as_deref()),
        ],
    };

    if !built.has_correct_option() {
        if policy.require_correct_option {
            return Err(ValidationError::CorrectOptionMissing(correct));
        }
        warn!(%correct, "accepting question whose correct option has no text");
    }

    Ok(built)
}

/// Validate a submission and append it to the store.
pub fn create_question(
    store: &dyn QuestionStore,
    request: &CreateQuestionRequest,
    policy: IngestPolicy,
) -> Result<CreateQuestionResponse, IngestError> {
    let question = validate_and_build(request, policy)?;
    let subject = question.subject.clone();
    let id = store.append(question)?;
    info!(id, %subject, "question created");

    Ok(CreateQuestionResponse {
        id,
        message: CREATED_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryQuestionStore;

    fn request() -> CreateQuestionRequest {
        CreateQuestionRequest {
            question: "What is a primary key?".to_string(),
            subject: "Databases".to_string(),
            r#use: "Positioning test".to_string(),
            correct: "A".to_string(),
            response_a: "A unique row identifier".to_string(),
            response_b: Some("A foreign reference".to_string()),
            response_c: None,
            response_d: None,
        }
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let mut req = request();
        req.subject = "  Databases ".to_string();
        req.response_c = Some("  ".to_string());
        let built = validate_and_build(&req, IngestPolicy::default()).unwrap();
        assert_eq!(built.subject, "Databases");
        assert_eq!(built.correct, AnswerLabel::A);
        assert_eq!(built.responses[1], "A foreign reference");
        assert_eq!(built.responses[2], "");
        assert_eq!(built.responses[3], "");
    }

    #[test]
    fn test_required_fields() {
        let cases: [(fn(&mut CreateQuestionRequest), &str); 4] = [
            (|r: &mut CreateQuestionRequest| r.question = String::new(), "question"),
            (|r: &mut CreateQuestionRequest| r.subject = " ".to_string(), "subject"),
            (|r: &mut CreateQuestionRequest| r.r#use = "\t".to_string(), "use"),
            (|r: &mut CreateQuestionRequest| r.response_a = String::new(), "responseA"),
        ];
        for (mutate, field) in cases {
            let mut req = request();
            mutate(&mut req);
            let err = validate_and_build(&req, IngestPolicy::default()).unwrap_err();
            assert_eq!(err, ValidationError::EmptyField(field));
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_correct_must_be_single_label() {
        for bad in ["", "E", "a", "AB", " A", "1"] {
            let mut req = request();
            req.correct = bad.to_string();
            assert_eq!(
                validate_and_build(&req, IngestPolicy::default()),
                Err(ValidationError::InvalidCorrect(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_empty_correct_option_depends_on_policy() {
        let mut req = request();
        req.correct = "D".to_string();

        assert!(validate_and_build(&req, IngestPolicy::default()).is_ok());

        let strict = IngestPolicy {
            require_correct_option: true,
        };
        assert_eq!(
            validate_and_build(&req, strict),
            Err(ValidationError::CorrectOptionMissing(AnswerLabel::D))
        );
    }

    #[test]
    fn test_rejected_submission_leaves_store_untouched() {
        let store = InMemoryQuestionStore::new();
        let mut req = request();
        req.correct = "Z".to_string();
        let err = create_question(&store, &req, IngestPolicy::default()).unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_returns_store_id() {
        let store = InMemoryQuestionStore::new();
        let first = create_question(&store, &request(), IngestPolicy::default()).unwrap();
        let second = create_question(&store, &request(), IngestPolicy::default()).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.message, CREATED_MESSAGE);
    }
}
