use serde::{Deserialize, Serialize};

/// Running tally for one session.
///
/// `correct_answers <= questions_visited` holds as long as callers record a
/// visit before the answer to that question, and at most one correct answer
/// per visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    correct_answers: u32,
    questions_visited: u32,
}

impl Score {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn questions_visited(&self) -> u32 {
        self.questions_visited
    }

    /// Counts a dispatched question, before its answer is known.
    pub fn record_visit(&mut self) {
        self.questions_visited = self.questions_visited.saturating_add(1);
    }

    pub fn record_correct(&mut self) {
        self.correct_answers = self.correct_answers.saturating_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rounded percentage of visited questions answered correctly; 0 when
    /// nothing has been visited yet.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.questions_visited == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct_answers) / f64::from(self.questions_visited);
        // ratio is in [0, 1] so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (ratio * 100.0).round() as u32;
        percent
    }

    /// Text shown in the score widget, e.g. `Score: 3/5`.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("Score: {}/{}", self.correct_answers, self.questions_visited)
    }
}
