use chrono::{DateTime, Utc};
use review_queue::{Decision, ReviewQueue, ReviewQueueError, Summary};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::utils::{elapsed_seconds, format_time_spent, timestamp_from_ms};

#[derive(Debug, thiserror::Error)]
pub enum FlashcardError {
    #[error(transparent)]
    Queue(#[from] ReviewQueueError),

    #[error("session is not complete: {remaining} cards remaining")]
    Incomplete { remaining: usize },
}

impl From<FlashcardError> for JsValue {
    fn from(error: FlashcardError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A generated deck, tied to the backend session that will receive the results.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FlashcardSet {
    pub session_id: u64,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum AnswerOutcome {
    /// The card was still face down, so the press only turned it over.
    Revealed,
    Recorded,
    SessionComplete,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FlashcardProgress {
    pub reviewed: u32,
    pub remaining: usize,
}

/// Sent to the backend once the deck is exhausted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FlashcardCompletion {
    pub session_id: u64,
    pub cards_known: u32,
    pub cards_unknown: u32,
    pub time_spent_seconds: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FlashcardReport {
    pub mastery_percentage: u32,
    pub cards_known: u32,
    pub cards_unknown: u32,
    /// Distinct cards in the deck, not decisions.
    pub total_cards: usize,
    pub time_spent_seconds: u64,
    pub time_label: String,
}

#[wasm_bindgen]
pub struct FlashcardSession {
    session_id: u64,
    flashcards: Vec<Flashcard>,
    queue: ReviewQueue,
    flipped: bool,
    started_at: DateTime<Utc>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl FlashcardSession {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(set: FlashcardSet, started_at_ms: f64) -> Self {
        crate::init_logging();

        log::info!(
            "Starting flashcard session {} with {} cards",
            set.session_id,
            set.flashcards.len()
        );

        Self {
            session_id: set.session_id,
            queue: ReviewQueue::new(set.flashcards.len()),
            flashcards: set.flashcards,
            flipped: false,
            started_at: timestamp_from_ms(started_at_ms),
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn current_card(&self) -> Option<Flashcard> {
        self.queue
            .current()
            .and_then(|index| self.flashcards.get(index))
            .cloned()
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_complete()
    }

    pub fn know(&mut self) -> Result<AnswerOutcome, FlashcardError> {
        self.answer(Decision::Known)
    }

    pub fn dont_know(&mut self) -> Result<AnswerOutcome, FlashcardError> {
        self.answer(Decision::Unknown)
    }

    pub fn progress(&self) -> FlashcardProgress {
        FlashcardProgress {
            reviewed: self.queue.reviewed(),
            remaining: self.queue.remaining(),
        }
    }

    pub fn progress_text(&self) -> String {
        let progress = self.progress();
        format!(
            "{} reviewed | {} remaining",
            progress.reviewed, progress.remaining
        )
    }

    pub fn finish(&self, now_ms: f64) -> Result<FlashcardCompletion, FlashcardError> {
        if !self.queue.is_complete() {
            let remaining = self.queue.remaining();
            log::warn!(
                "Tried to finish flashcard session {} with {remaining} cards left",
                self.session_id
            );
            return Err(FlashcardError::Incomplete { remaining });
        }

        let summary = self.queue.summary();
        Ok(FlashcardCompletion {
            session_id: self.session_id,
            cards_known: summary.known,
            cards_unknown: summary.unknown,
            time_spent_seconds: elapsed_seconds(self.started_at, timestamp_from_ms(now_ms)),
        })
    }

    pub fn report(&self, now_ms: f64) -> Result<FlashcardReport, FlashcardError> {
        let completion = self.finish(now_ms)?;
        let reviewed = (completion.cards_known + completion.cards_unknown).max(1);
        let mastery = completion.cards_known as f64 / reviewed as f64 * 100.0;

        Ok(FlashcardReport {
            mastery_percentage: mastery.round() as u32,
            cards_known: completion.cards_known,
            cards_unknown: completion.cards_unknown,
            total_cards: self.flashcards.len(),
            time_spent_seconds: completion.time_spent_seconds,
            time_label: format_time_spent(completion.time_spent_seconds),
        })
    }
}

impl FlashcardSession {
    pub fn summary(&self) -> Summary {
        self.queue.summary()
    }

    fn answer(&mut self, decision: Decision) -> Result<AnswerOutcome, FlashcardError> {
        if self.queue.is_complete() {
            log::warn!(
                "Ignoring {decision:?} on finished flashcard session {}",
                self.session_id
            );
            return Err(ReviewQueueError::InvalidState.into());
        }

        // the learner has to see the back before their answer counts
        if !self.flipped {
            self.flipped = true;
            return Ok(AnswerOutcome::Revealed);
        }

        self.queue.record(decision)?;
        self.flipped = false;

        if self.queue.is_complete() {
            log::info!("Flashcard session {} complete", self.session_id);
            Ok(AnswerOutcome::SessionComplete)
        } else {
            Ok(AnswerOutcome::Recorded)
        }
    }
}
