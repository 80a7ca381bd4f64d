use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of answer slots every question carries.
pub const NUM_OPTIONS: usize = 4;

/// Label of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; NUM_OPTIONS] =
        [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D];

    /// Position of the option inside `responses`.
    pub fn index(self) -> usize {
        match self {
            AnswerLabel::A => 0,
            AnswerLabel::B => 1,
            AnswerLabel::C => 2,
            AnswerLabel::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not exactly one of `A`, `B`, `C` or `D`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("correct answer must be A, B, C, or D (got {0:?})")]
pub struct InvalidLabel(pub String);

impl FromStr for AnswerLabel {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(AnswerLabel::A),
            "B" => Ok(AnswerLabel::B),
            "C" => Ok(AnswerLabel::C),
            "D" => Ok(AnswerLabel::D),
            other => Err(InvalidLabel(other.to_string())),
        }
    }
}

/// A stored multiple choice question.
///
/// An empty string in `responses` means the option does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub subject: String,
    pub r#use: String,
    pub correct: AnswerLabel,
    pub responses: [String; NUM_OPTIONS],
}

impl Question {
    /// Text of an option, `None` when the option is absent.
    pub fn response(&self, label: AnswerLabel) -> Option<&str> {
        let text = self.responses[label.index()].as_str();
        (!text.is_empty()).then_some(text)
    }
}

/// A question that has not been given an id by the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub subject: String,
    pub r#use: String,
    pub correct: AnswerLabel,
    pub responses: [String; NUM_OPTIONS],
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            subject: self.subject,
            r#use: self.r#use,
            correct: self.correct,
            responses: self.responses,
        }
    }

    /// Whether the option marked as correct actually has text.
    pub fn has_correct_option(&self) -> bool {
        !self.responses[self.correct.index()].is_empty()
    }
}

/// Answer-free projection of a question sent to test takers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub subject: String,
    pub responses: BTreeMap<AnswerLabel, Option<String>>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let responses = AnswerLabel::ALL
            .into_iter()
            .map(|label| (label, question.response(label).map(str::to_string)))
            .collect();

        Self {
            id: question.id,
            question: question.question.clone(),
            subject: question.subject.clone(),
            responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: 7,
            question: "Which statement reads rows?".to_string(),
            subject: "Databases".to_string(),
            r#use: "Positioning test".to_string(),
            correct: AnswerLabel::B,
            responses: [
                "INSERT".to_string(),
                "SELECT".to_string(),
                String::new(),
                String::new(),
            ],
        }
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("C".parse::<AnswerLabel>(), Ok(AnswerLabel::C));
        assert!("c".parse::<AnswerLabel>().is_err());
        assert!("AB".parse::<AnswerLabel>().is_err());
        assert!("".parse::<AnswerLabel>().is_err());
        assert!("E".parse::<AnswerLabel>().is_err());
    }

    #[test]
    fn test_view_marks_absent_options() {
        let view = QuestionView::from(&sample_question());
        assert_eq!(view.responses[&AnswerLabel::A].as_deref(), Some("INSERT"));
        assert_eq!(view.responses[&AnswerLabel::C], None);
        assert_eq!(view.responses.len(), NUM_OPTIONS);
    }

    #[test]
    fn test_view_serialization_hides_correct() {
        let json = serde_json::to_value(QuestionView::from(&sample_question())).unwrap();
        assert!(json.get("correct").is_none());
        assert_eq!(json["responses"]["B"], "SELECT");
        assert!(json["responses"]["D"].is_null());
        assert_eq!(json["id"], 7);
    }
}
