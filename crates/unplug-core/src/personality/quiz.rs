//! Question flow state machine.
//!
//! Drives the 16-question quiz: decide the launch path, accept a fetched
//! question set, collect answers one at a time, classify on the last one.
//! The machine owns no I/O -- the caller fetches questions, persists the
//! outcome and renders events.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> AwaitingQuestions -> Presenting(0) -> ... -> Presenting(15) -> Completed
//! ```
//!
//! A failed or malformed question fetch leaves the flow in
//! `AwaitingQuestions`; retry is user-initiated.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::QuizError;
use crate::events::Event;
use crate::personality::classifier::{classify, Answer, ANSWER_COUNT};
use crate::storage::Preferences;

/// Separator splitting a question into its two option labels.
const OPTION_SEPARATOR: &str = " or ";

/// Fallback option labels when the prompt has no clean split.
const DEFAULT_OPTIONS: (&str, &str) = ("Yes", "No");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    Idle,
    AwaitingQuestions,
    Presenting { index: usize },
    Completed,
}

/// Which displayed option the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    OptionA,
    OptionB,
}

impl Choice {
    fn answer(self) -> Answer {
        match self {
            Choice::OptionA => Answer::A,
            Choice::OptionB => Answer::B,
        }
    }
}

/// One quiz question with its two displayed option labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub option_a: String,
    pub option_b: String,
}

impl Question {
    /// Derive the option labels by splitting the prompt on `" or "`.
    /// Anything but a clean two-part split falls back to Yes/No.
    pub fn parse(prompt: &str) -> Self {
        let parts: Vec<&str> = prompt.split(OPTION_SEPARATOR).collect();
        let (option_a, option_b) = if parts.len() == 2 {
            (parts[0].to_string(), parts[1].to_string())
        } else {
            (
                DEFAULT_OPTIONS.0.to_string(),
                DEFAULT_OPTIONS.1.to_string(),
            )
        };
        Self {
            prompt: prompt.to_string(),
            option_a,
            option_b,
        }
    }
}

/// Question flow controller.
///
/// Sequences the quiz and invokes the classifier; persistence stays with
/// the caller, which hands the completed label to
/// [`Preferences::complete`](crate::storage::Preferences::complete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizFlow {
    state: QuizState,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl QuizFlow {
    pub fn new() -> Self {
        Self {
            state: QuizState::Idle,
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// The question currently being presented, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::Presenting { index } => self.questions.get(index),
            _ => None,
        }
    }

    /// (answered, total) for the progress line.
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Decide the launch path from stored preferences.
    ///
    /// Returns `Some(NavigateToSummary)` when the quiz was completed on a
    /// previous launch: no re-fetch, no re-quiz, the stored label is
    /// reused. `None` means the caller should fetch the question set.
    pub fn begin(&mut self, prefs: &Preferences) -> Option<Event> {
        if prefs.has_completed_test() {
            debug!("quiz already completed, skipping to summary");
            self.state = QuizState::Completed;
            Some(Event::NavigateToSummary {
                label: prefs.personality().cloned(),
                at: Utc::now(),
            })
        } else {
            self.state = QuizState::AwaitingQuestions;
            None
        }
    }

    /// Accept a fetched question set and present the first question.
    ///
    /// A payload without exactly [`ANSWER_COUNT`] questions is rejected
    /// and the flow stays in `AwaitingQuestions`.
    pub fn questions_received(&mut self, prompts: Vec<String>) -> Result<Event, QuizError> {
        if self.state != QuizState::AwaitingQuestions {
            return Err(QuizError::NotAwaitingQuestions);
        }
        if prompts.len() != ANSWER_COUNT {
            warn!(got = prompts.len(), "question payload has wrong length");
            return Err(QuizError::InvalidQuestionCount {
                expected: ANSWER_COUNT,
                got: prompts.len(),
            });
        }

        self.questions = prompts.iter().map(|p| Question::parse(p)).collect();
        self.state = QuizState::Presenting { index: 0 };
        Ok(Event::QuestionsReceived {
            count: self.questions.len(),
            at: Utc::now(),
        })
    }

    /// Record a failed question fetch. The flow stays in
    /// `AwaitingQuestions`; retry is user-initiated.
    pub fn fetch_failed(&mut self) {
        warn!("question fetch failed, awaiting user retry");
    }

    /// Record the answer to the current question.
    ///
    /// Advances to the next question, or on the last one runs the
    /// classifier and completes with the resolved label.
    pub fn answer(&mut self, choice: Choice) -> Result<Event, QuizError> {
        let index = match self.state {
            QuizState::Presenting { index } => index,
            _ => return Err(QuizError::NotPresenting),
        };

        self.answers.push(choice.answer());
        debug!(index, ?choice, "answer recorded");

        if index + 1 < self.questions.len() {
            self.state = QuizState::Presenting { index: index + 1 };
            Ok(Event::QuestionAnswered {
                index,
                choice,
                at: Utc::now(),
            })
        } else {
            let label = classify(&self.answers)?;
            self.state = QuizState::Completed;
            debug!(%label, "quiz completed");
            Ok(Event::QuizCompleted {
                label,
                at: Utc::now(),
            })
        }
    }
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::PersonalityLabel;

    fn prompts() -> Vec<String> {
        (0..16)
            .map(|i| format!("Question {i}: stay in or go out?"))
            .collect()
    }

    #[test]
    fn split_on_or_yields_two_options() {
        let q = Question::parse("Do you like cats or dogs?");
        assert_eq!(q.option_a, "Do you like cats");
        assert_eq!(q.option_b, "dogs?");
    }

    #[test]
    fn no_separator_falls_back_to_yes_no() {
        let q = Question::parse("Are you usually on time?");
        assert_eq!(q.option_a, "Yes");
        assert_eq!(q.option_b, "No");
    }

    #[test]
    fn double_separator_falls_back_to_yes_no() {
        let q = Question::parse("Tea or coffee or water?");
        assert_eq!(q.option_a, "Yes");
        assert_eq!(q.option_b, "No");
    }

    #[test]
    fn begin_without_completion_awaits_questions() {
        let mut flow = QuizFlow::new();
        assert!(flow.begin(&Preferences::default()).is_none());
        assert_eq!(flow.state(), QuizState::AwaitingQuestions);
    }

    #[test]
    fn begin_with_completion_skips_to_summary() {
        let label: PersonalityLabel = "INTJ".parse().unwrap();
        let mut prefs = Preferences::default();
        prefs.complete(label.clone());

        let mut flow = QuizFlow::new();
        match flow.begin(&prefs) {
            Some(Event::NavigateToSummary {
                label: Some(stored),
                ..
            }) => assert_eq!(stored, label),
            other => panic!("expected NavigateToSummary, got {other:?}"),
        }
        assert_eq!(flow.state(), QuizState::Completed);
    }

    #[test]
    fn wrong_question_count_keeps_awaiting() {
        let mut flow = QuizFlow::new();
        flow.begin(&Preferences::default());

        let err = flow
            .questions_received(vec!["only one".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidQuestionCount { got: 1, .. }
        ));
        assert_eq!(flow.state(), QuizState::AwaitingQuestions);
    }

    #[test]
    fn questions_out_of_state_are_rejected() {
        let mut flow = QuizFlow::new();
        let err = flow.questions_received(prompts()).unwrap_err();
        assert!(matches!(err, QuizError::NotAwaitingQuestions));
    }

    #[test]
    fn answer_before_presenting_is_rejected() {
        let mut flow = QuizFlow::new();
        assert!(matches!(
            flow.answer(Choice::OptionA),
            Err(QuizError::NotPresenting)
        ));
    }

    #[test]
    fn full_run_classifies_on_last_answer() {
        let mut flow = QuizFlow::new();
        flow.begin(&Preferences::default());
        flow.questions_received(prompts()).unwrap();

        for i in 0..15 {
            match flow.answer(Choice::OptionA).unwrap() {
                Event::QuestionAnswered { index, .. } => assert_eq!(index, i),
                other => panic!("unexpected event: {other:?}"),
            }
            assert_eq!(flow.state(), QuizState::Presenting { index: i + 1 });
        }

        match flow.answer(Choice::OptionA).unwrap() {
            Event::QuizCompleted { label, .. } => assert_eq!(label.as_str(), "ESTJ"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(flow.state(), QuizState::Completed);
        assert!(matches!(
            flow.answer(Choice::OptionA),
            Err(QuizError::NotPresenting)
        ));
    }

    #[test]
    fn mixed_choices_reach_istj() {
        let mut flow = QuizFlow::new();
        flow.begin(&Preferences::default());
        flow.questions_received(prompts()).unwrap();

        // B on the E/I positions (0,4,8,12), A everywhere else.
        let mut completed = None;
        for i in 0..16 {
            let choice = if i % 4 == 0 {
                Choice::OptionB
            } else {
                Choice::OptionA
            };
            if let Event::QuizCompleted { label, .. } = flow.answer(choice).unwrap() {
                completed = Some(label);
            }
        }
        assert_eq!(completed.unwrap().as_str(), "ISTJ");
    }

    #[test]
    fn progress_tracks_answers() {
        let mut flow = QuizFlow::new();
        flow.begin(&Preferences::default());
        flow.questions_received(prompts()).unwrap();
        assert_eq!(flow.progress(), (0, 16));

        flow.answer(Choice::OptionB).unwrap();
        assert_eq!(flow.progress(), (1, 16));
        assert!(flow.current_question().is_some());
    }
}
