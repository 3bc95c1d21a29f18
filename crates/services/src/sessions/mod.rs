mod controller;
mod pool;
mod progress;
mod surface;
mod workflow;

#[cfg(test)]
mod test_harness;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{QuizSession, SelectOutcome, SessionState, SessionStatus};
pub use pool::QuestionPool;
pub use progress::SessionProgress;
pub use surface::{Feedback, OptionStyle, PresentationSurface, SessionHost};
pub use workflow::QuizLoopService;
