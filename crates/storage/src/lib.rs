#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonQuestionRepository;
pub use repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};
