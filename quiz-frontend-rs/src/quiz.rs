use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::utils::{elapsed_seconds, format_time_spent, timestamp_from_ms};

/// Sent in place of an answer for questions the learner skipped.
pub const UNANSWERED: i64 = -1;

const SUBMIT_FAILURE: &str = "Failed to submit quiz. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("option {option} is out of range for a question with {available} options")]
    OptionOutOfRange { option: usize, available: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    SubmitFailed(String),
}

impl From<QuizError> for JsValue {
    fn from(error: QuizError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuizSet {
    pub attempt_id: u64,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuizSubmission {
    pub attempt_id: u64,
    /// One entry per question, [`UNANSWERED`] for skipped ones.
    pub answers: Vec<i64>,
    pub time_spent_seconds: u64,
}

#[wasm_bindgen]
pub struct QuizSession {
    attempt_id: u64,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
    started_at: DateTime<Utc>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl QuizSession {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(set: QuizSet, started_at_ms: f64) -> Result<QuizSession, QuizError> {
        crate::init_logging();

        if set.questions.is_empty() {
            log::warn!("Quiz attempt {} came back with no questions", set.attempt_id);
            return Err(QuizError::EmptyQuiz);
        }

        log::info!(
            "Starting quiz attempt {} with {} questions",
            set.attempt_id,
            set.questions.len()
        );

        Ok(Self {
            attempt_id: set.attempt_id,
            answers: vec![None; set.questions.len()],
            questions: set.questions,
            current: 0,
            started_at: timestamp_from_ms(started_at_ms),
        })
    }

    pub fn attempt_id(&self) -> u64 {
        self.attempt_id
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Question {
        self.questions[self.current].clone()
    }

    pub fn question_number_text(&self) -> String {
        format!("Question {} of {}", self.current + 1, self.questions.len())
    }

    /// Select an option for the current question, replacing any earlier pick.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        let available = self.questions[self.current].options.len();
        if option >= available {
            log::warn!(
                "Option {option} picked for question {} which has {available} options",
                self.current
            );
            return Err(QuizError::OptionOutOfRange { option, available });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// On the last question the UI offers submit instead of next.
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.questions.len() - self.answered_count()
    }

    pub fn progress_percentage(&self) -> f64 {
        self.answered_count() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn progress_text(&self) -> String {
        format!(
            "{} of {} answered",
            self.answered_count(),
            self.questions.len()
        )
    }

    pub fn submission(&self, now_ms: f64) -> QuizSubmission {
        let unanswered = self.unanswered_count();
        if unanswered > 0 {
            log::info!(
                "Submitting quiz attempt {} with {unanswered} unanswered questions",
                self.attempt_id
            );
        }

        QuizSubmission {
            attempt_id: self.attempt_id,
            answers: self
                .answers
                .iter()
                .map(|answer| answer.map_or(UNANSWERED, |option| option as i64))
                .collect(),
            time_spent_seconds: elapsed_seconds(self.started_at, timestamp_from_ms(now_ms)),
        }
    }
}

/// `0` -> `"A"`, `1` -> `"B"`, ...
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn option_label(index: usize) -> String {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add('A' as u32))
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_default()
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum OptionMark {
    Correct,
    /// The learner picked this one and it was wrong.
    Incorrect,
    Unmarked,
}

/// One graded question, as returned by the grader.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuestionResult {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub user_answer: i64,
    pub is_correct: bool,
    pub explanation: String,
}

impl QuestionResult {
    pub fn option_mark(&self, option: usize) -> OptionMark {
        if option == self.correct_index {
            OptionMark::Correct
        } else if self.user_answer == option as i64 {
            OptionMark::Incorrect
        } else {
            OptionMark::Unmarked
        }
    }

    pub fn was_answered(&self) -> bool {
        self.user_answer != UNANSWERED
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub results: Vec<QuestionResult>,
    pub time_spent_seconds: u64,
}

/// The success flag and message every grader reply carries, read before the graded body.
#[derive(Deserialize)]
struct GradeReply {
    #[serde(default = "replied_ok")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn replied_ok() -> bool {
    true
}

impl QuizResult {
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let reply = GradeReply::deserialize(&value)?;
        if !reply.success {
            let message = reply
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SUBMIT_FAILURE.to_string());
            log::warn!("Quiz submission failed: {message}");
            return Err(QuizError::SubmitFailed(message));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn score_label(&self) -> String {
        format!("{}/{} correct", self.score, self.total)
    }

    pub fn time_label(&self) -> String {
        format_time_spent(self.time_spent_seconds)
    }
}
