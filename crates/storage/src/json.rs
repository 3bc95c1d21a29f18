//! JSON file question source.
//!
//! Expected layout:
//!
//! ```json
//! { "questions": [
//!     { "question": "...", "answers": ["a", "b", "c", "d"], "correctAnswerIndex": 2 }
//! ] }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::repository::{QuestionDocument, QuestionRepository, StorageError};

/// Default file name looked up when no path is configured.
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";

#[derive(Debug, Clone)]
pub struct JsonQuestionRepository {
    path: PathBuf,
}

impl JsonQuestionRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a question document from raw JSON text.
///
/// # Errors
///
/// Returns `StorageError::EmptySource` for blank input, `StorageError::Malformed`
/// if the text is not a question document, and the validation errors of
/// [`QuestionDocument::into_questions`].
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, StorageError> {
    if raw.trim().is_empty() {
        return Err(StorageError::EmptySource);
    }
    let document: QuestionDocument =
        serde_json::from_str(raw).map_err(|e| StorageError::Malformed(e.to_string()))?;
    document.into_questions()
}

#[async_trait]
impl QuestionRepository for JsonQuestionRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::NotFound {
                    path: self.path.display().to_string(),
                },
                _ => StorageError::Io(e.to_string()),
            })?;
        let questions = parse_questions(&raw)?;
        tracing::info!(
            path = %self.path.display(),
            count = questions.len(),
            "loaded questions"
        );
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_document() {
        let raw = r#"{
            "questions": [
                { "question": "2 + 2?", "answers": ["3", "4", "5", "22"], "correctAnswerIndex": 1 },
                { "question": "Rust mascot?", "answers": ["Ferris", "Gopher", "Duke", "Tux"], "correctAnswerIndex": 0 }
            ]
        }"#;
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct().get(), 1);
        assert_eq!(questions[1].options()[0], "Ferris");
    }

    #[test]
    fn blank_input_is_empty_source() {
        assert!(matches!(parse_questions(" \n\t"), Err(StorageError::EmptySource)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(parse_questions("{ not json"), Err(StorageError::Malformed(_))));
        assert!(matches!(
            parse_questions(r#"{ "items": [] }"#),
            Err(StorageError::Malformed(_))
        ));
    }

    #[test]
    fn empty_question_list_is_rejected() {
        assert!(matches!(
            parse_questions(r#"{ "questions": [] }"#),
            Err(StorageError::NoQuestions)
        ));
    }

    #[test]
    fn three_answers_is_invalid_question() {
        let raw = r#"{ "questions": [
            { "question": "Q", "answers": ["a", "b", "c"], "correctAnswerIndex": 0 }
        ] }"#;
        assert!(matches!(
            parse_questions(raw),
            Err(StorageError::InvalidQuestion { position: 0, .. })
        ));
    }
}
