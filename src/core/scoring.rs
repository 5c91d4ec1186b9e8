use crate::models::{AnswerPolicy, FieldValue, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while scoring a questionnaire
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("{instrument} expects {expected} answers, got {actual}")]
    ItemCountMismatch {
        instrument: Instrument,
        expected: usize,
        actual: usize,
    },

    #[error("answer {value} for item {item} is outside 0..={max}")]
    AnswerOutOfRange { item: usize, value: u8, max: u8 },

    #[error("answer for item {item} is missing or not a valid number")]
    InvalidAnswer { item: usize },

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
}

/// Self-report questionnaires supported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// PHQ-9
    Depression,
    /// GAD-7
    Anxiety,
    Stress,
}

/// Highest answer on every item's scale
const MAX_ITEM_VALUE: u8 = 3;

const DEPRESSION_BANDS: [(u32, Severity); 4] = [
    (4, Severity {
        level: "minimal",
        advice: "Your depression level is within the normal range. Keep up positive activities and a healthy lifestyle.",
    }),
    (9, Severity {
        level: "mild",
        advice: "You show mild symptoms of depression. Consider increasing social activity and exercise.",
    }),
    (14, Severity {
        level: "moderate",
        advice: "You show moderate depression. Consulting a psychologist or psychiatrist is recommended.",
    }),
    (u32::MAX, Severity {
        level: "severe",
        advice: "You show severe depression. Please seek help from a mental health professional as soon as possible.",
    }),
];

const ANXIETY_BANDS: [(u32, Severity); 4] = [
    (4, Severity {
        level: "minimal",
        advice: "Your anxiety level is within the normal range. Maintain a healthy lifestyle.",
    }),
    (9, Severity {
        level: "mild",
        advice: "You are experiencing mild anxiety. Consider relaxation and stress management techniques.",
    }),
    (14, Severity {
        level: "moderate",
        advice: "You are experiencing moderate anxiety. Consulting a mental health professional is recommended.",
    }),
    (u32::MAX, Severity {
        level: "severe",
        advice: "You are experiencing severe anxiety. Please consult a mental health professional as soon as possible.",
    }),
];

const STRESS_BANDS: [(u32, Severity); 4] = [
    (5, Severity {
        level: "low",
        advice: "Your stress level is low. Keep a healthy balance in your life.",
    }),
    (15, Severity {
        level: "moderate",
        advice: "You are experiencing moderate stress. Consider stress management such as meditation or exercise.",
    }),
    (25, Severity {
        level: "high",
        advice: "You are experiencing high stress. Try to reduce your load and talk to a professional.",
    }),
    (u32::MAX, Severity {
        level: "very high",
        advice: "You are experiencing very high stress. Please seek professional help as soon as possible.",
    }),
];

/// Answers converted from raw form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswers {
    pub values: Vec<u8>,
    /// Items that were substituted with 0
    pub defaulted_items: usize,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Depression, Instrument::Anxiety, Instrument::Stress];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Depression => "depression",
            Instrument::Anxiety => "anxiety",
            Instrument::Stress => "stress",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Instrument::Depression => "Depression test (PHQ-9)",
            Instrument::Anxiety => "Anxiety test (GAD-7)",
            Instrument::Stress => "Stress test",
        }
    }

    pub fn item_count(self) -> usize {
        match self {
            Instrument::Depression => 9,
            Instrument::Anxiety => 7,
            Instrument::Stress => 10,
        }
    }

    pub fn max_item_value(self) -> u8 {
        MAX_ITEM_VALUE
    }

    pub fn max_score(self) -> u32 {
        self.item_count() as u32 * u32::from(self.max_item_value())
    }

    /// Default dataset column holding each row's reference score
    pub fn score_column(self) -> &'static str {
        match self {
            Instrument::Depression => "Depression Value",
            Instrument::Anxiety => "Anxiety Value",
            Instrument::Stress => "Stress Value",
        }
    }

    /// Sum itemized answers after checking them against the instrument
    pub fn score(self, answers: &[u8]) -> Result<u32, ScoringError> {
        if answers.len() != self.item_count() {
            return Err(ScoringError::ItemCountMismatch {
                instrument: self,
                expected: self.item_count(),
                actual: answers.len(),
            });
        }

        let max = self.max_item_value();
        answers.iter().enumerate().try_fold(0u32, |total, (i, &value)| {
            if value > max {
                Err(ScoringError::AnswerOutOfRange { item: i + 1, value, max })
            } else {
                Ok(total + u32::from(value))
            }
        })
    }

    /// Convert fields `q1`..`qN` into answers under the given policy
    ///
    /// Missing, blank, unparseable and out-of-scale answers count as invalid.
    /// `DefaultToZero` substitutes 0 for them; `Reject` fails on the first.
    pub fn parse_answers(
        self,
        fields: &HashMap<String, FieldValue>,
        policy: AnswerPolicy,
    ) -> Result<ParsedAnswers, ScoringError> {
        let max = self.max_item_value();
        let mut values = Vec::with_capacity(self.item_count());
        let mut defaulted_items = 0;

        for item in 1..=self.item_count() {
            let answer = fields
                .get(&format!("q{}", item))
                .and_then(FieldValue::as_answer)
                .filter(|v| *v <= max);

            match (answer, policy) {
                (Some(value), _) => values.push(value),
                (None, AnswerPolicy::DefaultToZero) => {
                    defaulted_items += 1;
                    values.push(0);
                }
                (None, AnswerPolicy::Reject) => return Err(ScoringError::InvalidAnswer { item }),
            }
        }

        if defaulted_items > 0 {
            tracing::debug!("{}: {} answers defaulted to 0", self, defaulted_items);
        }

        Ok(ParsedAnswers { values, defaulted_items })
    }

    /// Severity band for an aggregate score
    pub fn severity(self, score: u32) -> Severity {
        let bands = match self {
            Instrument::Depression => &DEPRESSION_BANDS,
            Instrument::Anxiety => &ANXIETY_BANDS,
            Instrument::Stress => &STRESS_BANDS,
        };

        bands
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map(|(_, severity)| *severity)
            .unwrap_or(bands[bands.len() - 1].1)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "depression" | "phq9" | "phq-9" => Ok(Instrument::Depression),
            "anxiety" | "gad7" | "gad-7" => Ok(Instrument::Anxiety),
            "stress" => Ok(Instrument::Stress),
            _ => Err(ScoringError::UnknownInstrument(s.to_string())),
        }
    }
}
