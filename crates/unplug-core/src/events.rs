use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::personality::{Choice, PersonalityLabel};

/// Quiz flow state changes and navigation signals.
/// Front ends render these; the flow itself never touches a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A well-formed question set arrived; the first question is up.
    QuestionsReceived {
        count: usize,
        at: DateTime<Utc>,
    },
    QuestionAnswered {
        index: usize,
        choice: Choice,
        at: DateTime<Utc>,
    },
    /// Final answer recorded and the label resolved.
    QuizCompleted {
        label: PersonalityLabel,
        at: DateTime<Utc>,
    },
    /// Skip straight to the summary view, reusing the stored label.
    NavigateToSummary {
        label: Option<PersonalityLabel>,
        at: DateTime<Utc>,
    },
}
