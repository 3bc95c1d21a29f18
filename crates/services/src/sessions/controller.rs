use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use quiz_core::model::{OptionIndex, Question, Score, SessionSummary};
use quiz_core::{Clock, PhaseTimer, TimerPhase, TimerSettings};

use super::pool::QuestionPool;
use super::progress::SessionProgress;
use super::surface::{Feedback, OptionStyle, PresentationSurface, SessionHost};
use crate::error::SessionError;

//
// ─── STATES AND OUTCOMES ───────────────────────────────────────────────────────
//

/// Where the session is in its per-question cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingQuestion,
    Answering,
    Reviewing,
    Ended,
}

/// Result of advancing the session by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Ended,
}

/// What a player selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Correct,
    Incorrect,
    /// Duplicate, stale or out-of-range input; nothing changed.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Timed quiz state machine.
///
/// Driven by two serialized events: [`QuizSession::tick`] from the host loop
/// and [`QuizSession::select`] from player input. Each question is resolved
/// exactly once, by whichever of the two comes first; the `answered` flag
/// makes every later event for that question a no-op.
pub struct QuizSession<S, H> {
    pool: QuestionPool,
    timer: PhaseTimer,
    score: Score,
    current: Option<Question>,
    answered: bool,
    ended: bool,
    total: usize,
    clock: Clock,
    started_at: DateTime<Utc>,
    summary: Option<SessionSummary>,
    surface: S,
    host: H,
}

impl<S, H> QuizSession<S, H>
where
    S: PresentationSurface,
    H: SessionHost,
{
    /// Start a session and dispatch its first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the pool has no questions.
    pub fn start(
        pool: QuestionPool,
        settings: TimerSettings,
        clock: Clock,
        surface: S,
        host: H,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut session = Self {
            total: pool.remaining(),
            pool,
            timer: PhaseTimer::new(settings),
            score: Score::new(),
            current: None,
            answered: false,
            ended: false,
            clock,
            started_at: clock.now(),
            summary: None,
            surface,
            host,
        };
        tracing::info!(questions = session.total, "quiz session started");
        session.begin_cycle();
        session.render_ticker();
        Ok(session)
    }

    /// Replace the pool, zero the score and dispatch a fresh first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the new pool has no questions; the
    /// running session is left untouched in that case.
    pub fn restart(&mut self, pool: QuestionPool) -> Result<(), SessionError> {
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        self.total = pool.remaining();
        self.pool = pool;
        self.timer = PhaseTimer::new(self.timer.settings());
        self.score.reset();
        self.current = None;
        self.answered = false;
        self.ended = false;
        self.started_at = self.clock.now();
        self.summary = None;
        tracing::info!(questions = self.total, "quiz session restarted");

        self.begin_cycle();
        self.render_ticker();
        Ok(())
    }

    /// Advance the countdown by `delta` and react to the resulting phase.
    pub fn tick(&mut self, delta: Duration) -> SessionStatus {
        if self.ended {
            return SessionStatus::Ended;
        }

        if let Some(transition) = self.timer.tick(delta) {
            tracing::debug!(from = ?transition.from, to = ?transition.to, "timer phase changed");
        }

        match self.timer.phase() {
            TimerPhase::Reviewing if !self.answered => self.time_up(),
            TimerPhase::ReviewEnded => self.begin_cycle(),
            _ => {}
        }

        self.render_ticker();
        self.status()
    }

    /// Handle the player picking option `index`.
    ///
    /// Only the first selection while the answer window is open counts.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.ended || self.answered || self.timer.phase() != TimerPhase::Answering {
            tracing::debug!(index, "ignoring selection outside answer window");
            return SelectOutcome::Ignored;
        }
        let Some(selected) = OptionIndex::new(index) else {
            tracing::warn!(index, "ignoring out-of-range selection");
            return SelectOutcome::Ignored;
        };
        let Some(question) = self.current.as_ref() else {
            return SelectOutcome::Ignored;
        };

        let correct = question.correct();
        let outcome = if question.is_correct(selected) {
            self.score.record_correct();
            self.surface.show_feedback(Feedback::Correct);
            SelectOutcome::Correct
        } else {
            self.surface.show_feedback(Feedback::Incorrect);
            SelectOutcome::Incorrect
        };
        tracing::debug!(question = %question.id(), index, ?outcome, "answer selected");

        self.surface.set_option_style(correct, OptionStyle::Highlighted);
        self.surface.set_input_enabled(false);
        self.answered = true;
        self.timer.cancel();

        self.render_ticker();
        outcome
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.ended {
            return SessionState::Ended;
        }
        match self.timer.phase() {
            TimerPhase::Answering => SessionState::Answering,
            TimerPhase::Reviewing => SessionState::Reviewing,
            TimerPhase::NotStarted | TimerPhase::ReviewEnded => SessionState::AwaitingQuestion,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.ended {
            SessionStatus::Ended
        } else {
            SessionStatus::Running
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ended
    }

    /// True once the current question has been resolved by a selection or a timeout.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            visited: self.pool.drawn(),
            total: self.total,
            remaining: self.pool.remaining(),
            is_complete: self.ended,
        }
    }

    /// Present once the session has ended.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    fn begin_cycle(&mut self) {
        match self.pool.draw_random() {
            Some(question) => self.dispatch(question),
            None => self.finish(),
        }
    }

    fn dispatch(&mut self, question: Question) {
        self.score.record_visit();

        self.surface.show_question(question.text(), question.options());
        for index in OptionIndex::all() {
            self.surface.set_option_style(index, OptionStyle::Default);
        }
        self.surface.set_input_enabled(true);

        self.timer.start();
        self.answered = false;
        tracing::debug!(
            question = %question.id(),
            remaining = self.pool.remaining(),
            "question dispatched"
        );
        self.current = Some(question);
        let progress = self.progress();
        self.surface.show_progress(&progress);
    }

    fn time_up(&mut self) {
        self.surface.show_feedback(Feedback::TimeUp);
        self.surface.set_input_enabled(false);
        if let Some(question) = self.current.as_ref() {
            self.surface
                .set_option_style(question.correct(), OptionStyle::Highlighted);
            tracing::debug!(question = %question.id(), "answer window expired");
        }
        self.answered = true;
    }

    fn finish(&mut self) {
        self.ended = true;
        self.current = None;
        self.surface.set_input_enabled(false);
        let progress = self.progress();
        self.surface.show_progress(&progress);

        let completed_at = self.clock.now().max(self.started_at);
        match SessionSummary::new(self.score, self.started_at, completed_at) {
            Ok(summary) => {
                tracing::info!(
                    correct = summary.correct_answers(),
                    visited = summary.questions_visited(),
                    "quiz session over"
                );
                self.host.game_over(&summary);
                self.summary = Some(summary);
            }
            Err(err) => tracing::error!(%err, "could not build session summary"),
        }
    }

    fn render_ticker(&mut self) {
        self.surface
            .show_timer(self.timer.fill_ratio(), self.timer.phase());
        self.surface.show_score(&self.score);
    }
}

impl<S, H> fmt::Debug for QuizSession<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.timer.phase())
            .field("score", &self.score)
            .field("current", &self.current.as_ref().map(Question::id))
            .field("answered", &self.answered)
            .field("ended", &self.ended)
            .field("remaining", &self.pool.remaining())
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
