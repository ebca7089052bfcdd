//! Browser-side study sessions for the exam-prep client.
//!
//! The pages own the DOM and the network; this crate owns the state they used to keep in globals.
//! Each session is a plain object the page constructs when content arrives from the generator and
//! drives from its click handlers. Sessions produce the payloads the page posts back when they end.

mod flashcards;
mod generation;
mod quiz;
mod utils;

pub use flashcards::{
    AnswerOutcome, Flashcard, FlashcardCompletion, FlashcardError, FlashcardProgress,
    FlashcardReport, FlashcardSession, FlashcardSet,
};
pub use generation::{
    Difficulty, GenerateRequest, GenerateResponse, GenerationError, StudyConfig, StudyMode,
};
pub use quiz::{
    OptionMark, Question, QuestionResult, QuizError, QuizResult, QuizSession, QuizSet,
    QuizSubmission, UNANSWERED, option_label,
};
pub use review_queue::{Decision, REINSERT_OFFSET, Summary};
pub use utils::format_time_spent;

use std::sync::LazyLock;
use wasm_bindgen::prelude::*;

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("Logging initialized");
    }
});

/// Install the console logger and panic hook. Session constructors call this too.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn init_logging() {
    LazyLock::force(&LOGGER);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn parse_study_config(json: &str) -> Result<StudyConfig, GenerationError> {
    StudyConfig::from_json(json).inspect_err(|e| {
        log::error!("Error reading study config: {e:?}");
    })
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn parse_flashcard_set(json: &str) -> Result<FlashcardSet, GenerationError> {
    GenerateResponse::from_json(json)?.into_flashcard_set()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn parse_quiz_set(json: &str) -> Result<QuizSet, GenerationError> {
    GenerateResponse::from_json(json)?.into_quiz_set()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn parse_quiz_result(json: &str) -> Result<QuizResult, QuizError> {
    QuizResult::from_json(json).inspect_err(|e| {
        log::error!("Error reading quiz result: {e:?}");
    })
}

// The payload types reach JS as plain objects, so their helpers are exported as free functions.

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn study_page_title(config: StudyConfig) -> String {
    config.page_title()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn generate_request(config: StudyConfig) -> GenerateRequest {
    config.generate_request()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn option_mark(result: QuestionResult, option: usize) -> OptionMark {
    result.option_mark(option)
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn was_answered(result: QuestionResult) -> bool {
    result.was_answered()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn quiz_score_label(result: QuizResult) -> String {
    result.score_label()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn quiz_time_label(result: QuizResult) -> String {
    result.time_label()
}
