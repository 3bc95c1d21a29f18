use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Score;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed questions visited ({visited})")]
    CountMismatch { correct: u32, visited: u32 },
}

/// How the final score reads on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Every visited question was answered correctly.
    Perfect,
    /// Strictly more than half (integer half) were correct.
    AboveHalf,
    KeepPracticing,
}

impl Verdict {
    #[must_use]
    pub fn from_counts(correct: u32, visited: u32) -> Self {
        if correct == visited {
            Verdict::Perfect
        } else if correct > visited / 2 {
            Verdict::AboveHalf
        } else {
            Verdict::KeepPracticing
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Perfect => "Congratulations! You answered every question correctly.",
            Verdict::AboveHalf => "Good job! You answered more than half of the questions correctly.",
            Verdict::KeepPracticing => "Keep practicing! You can do better next time.",
        }
    }
}

/// Final result of a session, handed to the host on game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    correct_answers: u32,
    questions_visited: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::CountMismatch` if the score claims more correct answers than visits.
    pub fn new(
        score: Score,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let correct = score.correct_answers();
        let visited = score.questions_visited();
        if correct > visited {
            return Err(SummaryError::CountMismatch { correct, visited });
        }

        Ok(Self {
            correct_answers: correct,
            questions_visited: visited,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn questions_visited(&self) -> u32 {
        self.questions_visited
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_counts(self.correct_answers, self.questions_visited)
    }

    /// Game-over text: the raw result followed by the verdict line.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Game over! You answered {} of {} questions correctly.\n{}",
            self.correct_answers,
            self.questions_visited,
            self.verdict().message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn score(correct: u32, visited: u32) -> Score {
        let mut score = Score::new();
        for _ in 0..visited {
            score.record_visit();
        }
        for _ in 0..correct {
            score.record_correct();
        }
        score
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::from_counts(4, 4), Verdict::Perfect);
        assert_eq!(Verdict::from_counts(3, 4), Verdict::AboveHalf);
        assert_eq!(Verdict::from_counts(2, 4), Verdict::KeepPracticing);
        // integer half of 5 is 2, so 3 of 5 is above half
        assert_eq!(Verdict::from_counts(3, 5), Verdict::AboveHalf);
        assert_eq!(Verdict::from_counts(0, 0), Verdict::Perfect);
    }

    #[test]
    fn summary_message_includes_counts_and_verdict() {
        let now = fixed_now();
        let summary = SessionSummary::new(score(1, 2), now, now).unwrap();
        let message = summary.message();
        assert!(message.starts_with("Game over! You answered 1 of 2 questions correctly."));
        assert!(message.ends_with(Verdict::KeepPracticing.message()));
    }

    #[test]
    fn summary_rejects_inverted_time_range() {
        let now = fixed_now();
        let err =
            SessionSummary::new(score(0, 1), now, now - chrono::Duration::seconds(1)).unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_rejects_more_correct_than_visited() {
        let mut score = Score::new();
        score.record_correct();
        let err = SessionSummary::new(score, fixed_now(), fixed_now()).unwrap_err();
        assert_eq!(
            err,
            SummaryError::CountMismatch {
                correct: 1,
                visited: 0
            }
        );
    }

    #[test]
    fn summary_tracks_elapsed_time() {
        let now = fixed_now();
        let later = now + chrono::Duration::seconds(42);
        let summary = SessionSummary::new(score(2, 2), now, later).unwrap();
        assert_eq!(summary.elapsed(), chrono::Duration::seconds(42));
        assert_eq!(summary.verdict(), Verdict::Perfect);
    }
}
