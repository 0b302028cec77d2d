//! Personality classification over a fixed 16-answer quiz.
//!
//! Scoring is table-driven: each of the four trait dimensions owns four
//! answer positions and counts how many of them match its scoring answer.
//! A count of 2 or more (majority or tie) resolves the dimension to its
//! high letter, otherwise to its low letter.
//!
//! ## Usage
//!
//! ```ignore
//! let label = classify(&answers)?; // answers: &[Answer], length 16
//! assert_eq!(label.as_str().len(), 4);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Number of answers the classifier requires.
pub const ANSWER_COUNT: usize = 16;

/// One quiz answer. `A` is the first displayed option, `B` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    A,
    B,
}

/// A 4-letter personality code, one letter per trait dimension.
///
/// The alphabet is {E,I}{S,N}{T,F}{J,P} in label order. Construction goes
/// through [`classify`] or the validating [`FromStr`] impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonalityLabel(String);

impl PersonalityLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonalityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PersonalityLabel {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != DIMENSIONS.len() {
            return Err(ClassifierError::InvalidLabel(s.to_string()));
        }
        for (c, dim) in chars.iter().zip(DIMENSIONS.iter()) {
            if *c != dim.high && *c != dim.low {
                return Err(ClassifierError::InvalidLabel(s.to_string()));
            }
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PersonalityLabel {
    type Error = ClassifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PersonalityLabel> for String {
    fn from(label: PersonalityLabel) -> Self {
        label.0
    }
}

/// One trait dimension: the answer positions it scores, which answer
/// counts toward the high letter, and the two letters it resolves to.
struct DimensionRule {
    indices: [usize; 4],
    scores_on: Answer,
    high: char,
    low: char,
}

/// The scoring table, in label order. Positions 0,4,8,12 drive E/I,
/// 1,5,9,13 drive S/N, 2,6,10,14 drive T/F and 3,7,11,15 drive J/P.
const DIMENSIONS: [DimensionRule; 4] = [
    DimensionRule {
        indices: [0, 4, 8, 12],
        scores_on: Answer::B,
        high: 'I',
        low: 'E',
    },
    DimensionRule {
        indices: [1, 5, 9, 13],
        scores_on: Answer::B,
        high: 'N',
        low: 'S',
    },
    DimensionRule {
        indices: [2, 6, 10, 14],
        scores_on: Answer::A,
        high: 'T',
        low: 'F',
    },
    DimensionRule {
        indices: [3, 7, 11, 15],
        scores_on: Answer::A,
        high: 'J',
        low: 'P',
    },
];

/// Majority (or tie) resolves a dimension to its high letter.
const HIGH_THRESHOLD: usize = 2;

/// Map 16 ordered answers to a 4-letter personality label.
///
/// Pure and deterministic. The only failure mode is a sequence whose
/// length is not exactly [`ANSWER_COUNT`].
pub fn classify(answers: &[Answer]) -> Result<PersonalityLabel, ClassifierError> {
    if answers.len() != ANSWER_COUNT {
        return Err(ClassifierError::InvalidAnswerCount {
            expected: ANSWER_COUNT,
            got: answers.len(),
        });
    }

    let code: String = DIMENSIONS
        .iter()
        .map(|dim| {
            let score = dim
                .indices
                .iter()
                .filter(|&&i| answers[i] == dim.scores_on)
                .count();
            if score >= HIGH_THRESHOLD {
                dim.high
            } else {
                dim.low
            }
        })
        .collect();

    Ok(PersonalityLabel(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answers(pattern: impl Fn(usize) -> Answer) -> Vec<Answer> {
        (0..ANSWER_COUNT).map(pattern).collect()
    }

    #[test]
    fn all_first_options_is_estj() {
        let label = classify(&answers(|_| Answer::A)).unwrap();
        assert_eq!(label.as_str(), "ESTJ");
    }

    #[test]
    fn all_second_options_is_infp() {
        let label = classify(&answers(|_| Answer::B)).unwrap();
        assert_eq!(label.as_str(), "INFP");
    }

    #[test]
    fn b_on_first_dimension_only_is_istj() {
        // Positions 0,4,8,12 answered B, everything else A.
        let label = classify(&answers(|i| if i % 4 == 0 { Answer::B } else { Answer::A })).unwrap();
        assert_eq!(label.as_str(), "ISTJ");
    }

    #[test]
    fn tie_resolves_to_high_letter() {
        // First half B on E/I + S/N positions, second half B on T/F + J/P
        // positions: every dimension scores exactly 2 and resolves high.
        let label = classify(&answers(|i| {
            let scores_low_half = i % 4 < 2;
            if (i < 8) == scores_low_half {
                Answer::B
            } else {
                Answer::A
            }
        }))
        .unwrap();
        assert_eq!(label.as_str(), "INTJ");
    }

    #[test]
    fn short_sequence_is_rejected() {
        let err = classify(&answers(|_| Answer::A)[..15]).unwrap_err();
        assert_eq!(
            err,
            ClassifierError::InvalidAnswerCount {
                expected: 16,
                got: 15
            }
        );
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = classify(&[]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InvalidAnswerCount { got: 0, .. }
        ));
    }

    #[test]
    fn label_parses_valid_codes() {
        for code in ["ESTJ", "INFP", "ISTJ", "ENFJ"] {
            let label: PersonalityLabel = code.parse().unwrap();
            assert_eq!(label.as_str(), code);
        }
    }

    #[test]
    fn label_rejects_malformed_codes() {
        for code in ["", "EST", "ESTJX", "XSTJ", "EXTJ", "estj"] {
            assert!(code.parse::<PersonalityLabel>().is_err(), "{code:?}");
        }
    }

    #[test]
    fn label_serde_roundtrip() {
        let label: PersonalityLabel = "INTP".parse().unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"INTP\"");
        let back: PersonalityLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }

    fn any_answer() -> impl Strategy<Value = Answer> {
        prop_oneof![Just(Answer::A), Just(Answer::B)]
    }

    proptest! {
        #[test]
        fn classify_is_total_and_well_formed(
            answers in proptest::collection::vec(any_answer(), ANSWER_COUNT)
        ) {
            let label = classify(&answers).unwrap();
            let code: Vec<char> = label.as_str().chars().collect();
            prop_assert_eq!(code.len(), 4);
            for (c, dim) in code.iter().zip(DIMENSIONS.iter()) {
                prop_assert!(*c == dim.high || *c == dim.low);
            }
            // Same input, same label.
            prop_assert_eq!(classify(&answers).unwrap(), label);
        }
    }
}
