use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quiz_core::model::Question;

/// The shrinking set of not-yet-asked questions for one session.
///
/// Draws are uniform over the questions still in the pool and remove the drawn
/// question (swap-remove), so `drawn() + remaining()` always equals
/// `initial_size()`.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    questions: Vec<Question>,
    initial_size: usize,
    rng: StdRng,
}

impl QuestionPool {
    /// Pool seeded from the thread-local generator.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self::with_rng(questions, StdRng::from_rng(&mut rand::rng()))
    }

    /// Pool with a reproducible draw order.
    #[must_use]
    pub fn seeded(questions: Vec<Question>, seed: u64) -> Self {
        Self::with_rng(questions, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(questions: Vec<Question>, rng: StdRng) -> Self {
        let initial_size = questions.len();
        Self {
            questions,
            initial_size,
            rng,
        }
    }

    /// Removes and returns a uniformly chosen question, or `None` once the
    /// pool is exhausted.
    pub fn draw_random(&mut self) -> Option<Question> {
        if self.questions.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.questions.len());
        Some(self.questions.swap_remove(index))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    #[must_use]
    pub fn drawn(&self) -> usize {
        self.initial_size - self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
