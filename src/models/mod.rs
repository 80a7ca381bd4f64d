mod question;

pub use question::{AnswerLabel, InvalidLabel, NUM_OPTIONS, NewQuestion, Question, QuestionView};
