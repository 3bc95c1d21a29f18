use std::sync::Arc;

use quiz_core::TimerSettings;
use storage::QuestionRepository;

use super::controller::QuizSession;
use super::pool::QuestionPool;
use super::surface::{PresentationSurface, SessionHost};
use crate::Clock;
use crate::error::SessionError;

/// Wires the question source, timer settings and clock into quiz sessions.
///
/// Every start or restart reloads the questions, so a session never reuses a
/// pool from a previous run.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    settings: TimerSettings,
    seed: Option<u64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        settings: TimerSettings,
    ) -> Self {
        Self {
            clock,
            questions,
            settings,
            seed: None,
        }
    }

    /// Build the service from raw durations in seconds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Timer` if either duration is not a positive,
    /// finite number of seconds.
    pub fn with_durations(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        answer_secs: f64,
        review_secs: f64,
    ) -> Result<Self, SessionError> {
        let settings = TimerSettings::from_secs_f64(answer_secs, review_secs)?;
        Ok(Self::new(clock, questions, settings))
    }

    /// Fix the draw order, for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Load questions and start a new session on the given surface and host.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question source cannot be read.
    pub async fn start_session<S, H>(
        &self,
        surface: S,
        host: H,
    ) -> Result<QuizSession<S, H>, SessionError>
    where
        S: PresentationSurface,
        H: SessionHost,
    {
        let pool = self.load_pool().await?;
        QuizSession::start(pool, self.settings, self.clock, surface, host)
    }

    /// Reload questions and restart `session` from its first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the question source cannot be read;
    /// the session is left as it was.
    pub async fn restart<S, H>(&self, session: &mut QuizSession<S, H>) -> Result<(), SessionError>
    where
        S: PresentationSurface,
        H: SessionHost,
    {
        let pool = self.load_pool().await?;
        session.restart(pool)
    }

    async fn load_pool(&self) -> Result<QuestionPool, SessionError> {
        let questions = self.questions.load_questions().await?;
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(match self.seed {
            Some(seed) => QuestionPool::seeded(questions, seed),
            None => QuestionPool::new(questions),
        })
    }
}
