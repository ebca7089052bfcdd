use serde::{Deserialize, Deserializer, Serialize};
use wasm_bindgen::JsValue;

use crate::flashcards::{Flashcard, FlashcardSet};
use crate::quiz::{Question, QuizSet};

const FLASHCARD_FAILURE: &str = "Failed to generate flashcards. Please try again.";
const QUIZ_FAILURE: &str = "Failed to generate quiz. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

impl From<GenerationError> for JsValue {
    fn from(error: GenerationError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Anything the backend wouldn't accept is treated as medium, same as the backend does.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Difficulty::parse).unwrap_or_default())
}

#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    #[default]
    Quiz,
    Flashcard,
}

/// What the learner picked on the subject page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct StudyConfig {
    pub subject_id: u64,
    pub unit_id: u64,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mode: StudyMode,
    pub subject_name: String,
}

impl StudyConfig {
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest {
            subject_id: self.subject_id,
            unit_id: self.unit_id,
            difficulty: self.difficulty,
            mode: self.mode,
        }
    }

    pub fn page_title(&self) -> String {
        match self.mode {
            StudyMode::Quiz => format!("{} - Quiz", self.subject_name),
            StudyMode::Flashcard => format!("{} - Flashcards", self.subject_name),
        }
    }
}

/// Body of the content-generation request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct GenerateRequest {
    pub subject_id: u64,
    pub unit_id: u64,
    pub difficulty: Difficulty,
    pub mode: StudyMode,
}

/// Content-generation response. Which of the id/content pairs is filled in depends on the mode.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<u64>,
    #[serde(default)]
    pub attempt_id: Option<u64>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

impl GenerateResponse {
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        Ok(serde_json::from_str(json)?)
    }

    fn failure(self, fallback: &str) -> GenerationError {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        log::warn!("Content generation failed: {message}");
        GenerationError::Failed(message)
    }

    pub fn into_flashcard_set(self) -> Result<FlashcardSet, GenerationError> {
        match self.session_id {
            Some(session_id) if self.success && !self.flashcards.is_empty() => Ok(FlashcardSet {
                session_id,
                flashcards: self.flashcards,
            }),
            _ => Err(self.failure(FLASHCARD_FAILURE)),
        }
    }

    pub fn into_quiz_set(self) -> Result<QuizSet, GenerationError> {
        match self.attempt_id {
            Some(attempt_id) if self.success && !self.questions.is_empty() => Ok(QuizSet {
                attempt_id,
                questions: self.questions,
            }),
            _ => Err(self.failure(QUIZ_FAILURE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_config_from_subject_page() {
        let config = StudyConfig::from_json(
            r#"{"subject_id": 4, "unit_id": 12, "difficulty": "hard", "mode": "flashcard", "subject_name": "Engineering Maths"}"#,
        )
        .unwrap();

        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.mode, StudyMode::Flashcard);
        assert_eq!(config.page_title(), "Engineering Maths - Flashcards");
        assert_eq!(
            serde_json::to_value(config.generate_request()).unwrap(),
            serde_json::json!({
                "subject_id": 4,
                "unit_id": 12,
                "difficulty": "hard",
                "mode": "flashcard",
            })
        );
    }

    #[test]
    fn test_difficulty_falls_back_to_medium() {
        let config = StudyConfig::from_json(
            r#"{"subject_id": 1, "unit_id": 2, "difficulty": "extreme", "subject_name": "Physics"}"#,
        )
        .unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.mode, StudyMode::Quiz);
        assert_eq!(config.page_title(), "Physics - Quiz");

        let config =
            StudyConfig::from_json(r#"{"subject_id": 1, "unit_id": 2, "subject_name": "Physics"}"#)
                .unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_study_config_rejects_garbage() {
        assert!(matches!(
            StudyConfig::from_json("not json"),
            Err(GenerationError::Json(_))
        ));
    }

    #[test]
    fn test_flashcard_response() {
        let response = GenerateResponse::from_json(
            r#"{
                "success": true,
                "session_id": 17,
                "flashcards": [
                    {"front": "Ohm's law", "back": "V = IR"},
                    {"front": "Unit of charge", "back": "Coulomb"}
                ],
                "subject_name": "Electrical",
                "unit_name": "Basics"
            }"#,
        )
        .unwrap();

        let set = response.into_flashcard_set().unwrap();
        assert_eq!(set.session_id, 17);
        assert_eq!(set.flashcards.len(), 2);
        assert_eq!(set.flashcards[1].back, "Coulomb");
    }

    #[test]
    fn test_failed_generation_uses_backend_message() {
        let response = GenerateResponse::from_json(
            r#"{"success": false, "message": "Subject or unit not found"}"#,
        )
        .unwrap();

        match response.into_quiz_set() {
            Err(GenerationError::Failed(message)) => {
                assert_eq!(message, "Subject or unit not found")
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_generation_uses_fallback_message() {
        let response =
            GenerateResponse::from_json(r#"{"success": true, "session_id": 3, "flashcards": []}"#)
                .unwrap();

        let error = response.into_flashcard_set().unwrap_err();
        assert_eq!(error.to_string(), FLASHCARD_FAILURE);

        let response = GenerateResponse::from_json(r#"{"success": true, "questions": []}"#).unwrap();
        assert_eq!(
            response.into_quiz_set().unwrap_err().to_string(),
            QUIZ_FAILURE
        );
    }
}
