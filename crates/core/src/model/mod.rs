mod ids;
mod question;
mod score;
mod summary;

pub use ids::QuestionId;
pub use question::{OPTION_COUNT, OptionIndex, Question, QuestionError};
pub use score::Score;
pub use summary::{SessionSummary, SummaryError, Verdict};
