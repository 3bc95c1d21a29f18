#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SessionError;
pub use sessions::{
    Feedback, OptionStyle, PresentationSurface, QuestionPool, QuizLoopService, QuizSession,
    SelectOutcome, SessionHost, SessionProgress, SessionState, SessionStatus,
};
