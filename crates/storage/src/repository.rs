use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError, QuestionId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question sources. All of them are fatal at session setup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question source not found: {path}")]
    NotFound { path: String },

    #[error("question source is empty")]
    EmptySource,

    #[error("question source is malformed: {0}")]
    Malformed(String),

    #[error("question source contains no questions")]
    NoQuestions,

    #[error("question #{position} is invalid: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: QuestionError,
    },

    #[error("could not read question source: {0}")]
    Io(String),
}

/// On-disk shape of one question.
///
/// Kept apart from the domain `Question` so the file format can stay loose
/// (any option count, signed index) while the domain type stays validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: i64,
}

impl QuestionRecord {
    /// Convert the record into a domain `Question` identified by its position.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record breaks a question invariant.
    pub fn into_question(self, position: usize) -> Result<Question, QuestionError> {
        let id = QuestionId::new(u64::try_from(position).unwrap_or(u64::MAX));
        Question::new(id, self.question, self.answers, self.correct_answer_index)
    }
}

/// Root object of a question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub questions: Vec<QuestionRecord>,
}

impl QuestionDocument {
    /// Validate every record, failing on the first bad one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoQuestions` for an empty list and
    /// `StorageError::InvalidQuestion` for the first invalid record.
    pub fn into_questions(self) -> Result<Vec<Question>, StorageError> {
        if self.questions.is_empty() {
            return Err(StorageError::NoQuestions);
        }
        self.questions
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                record.into_question(position).map_err(|source| {
                    tracing::warn!(position, %source, "rejected question record");
                    StorageError::InvalidQuestion { position, source }
                })
            })
            .collect()
    }
}

/// Supplies the full question set at session start.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every question, in source order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source is missing, empty, malformed, or
    /// contains an invalid question. Never returns an empty list.
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// In-memory question source for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }

    /// Replace the stored questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn set_questions(&self, questions: Vec<Question>) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = questions;
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        if guard.is_empty() {
            return Err(StorageError::NoQuestions);
        }
        Ok(guard.clone())
    }
}

/// Question source behind a trait object so hosts can swap backends.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn json(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            questions: Arc::new(crate::json::JsonQuestionRepository::new(path)),
        }
    }
}
