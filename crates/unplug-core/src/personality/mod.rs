//! Personality quiz -- classification and question flow.

mod classifier;
mod quiz;

pub use classifier::{classify, Answer, PersonalityLabel, ANSWER_COUNT};
pub use quiz::{Choice, Question, QuizFlow, QuizState};
