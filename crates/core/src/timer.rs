//! Two-phase countdown driving each question: an answering window followed by
//! a review window.
//!
//! The timer owns no thread. The host advances it with [`PhaseTimer::tick`]
//! and the session controller queries [`PhaseTimer::phase`] once per tick.

use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("answer duration must be > 0")]
    InvalidAnswerDuration,

    #[error("review duration must be > 0")]
    InvalidReviewDuration,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Validated per-question durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    answer: Duration,
    review: Duration,
}

impl Default for TimerSettings {
    /// 10 seconds to answer, 3 seconds to review.
    fn default() -> Self {
        Self {
            answer: Duration::from_secs(10),
            review: Duration::from_secs(3),
        }
    }
}

impl TimerSettings {
    /// # Errors
    ///
    /// Returns `TimerError` if either duration is zero.
    pub fn new(answer: Duration, review: Duration) -> Result<Self, TimerError> {
        if answer.is_zero() {
            return Err(TimerError::InvalidAnswerDuration);
        }
        if review.is_zero() {
            return Err(TimerError::InvalidReviewDuration);
        }
        Ok(Self { answer, review })
    }

    /// Same as [`TimerSettings::new`] but from fractional seconds.
    ///
    /// # Errors
    ///
    /// Returns `TimerError` if either value is zero, negative, NaN or infinite.
    pub fn from_secs_f64(answer_secs: f64, review_secs: f64) -> Result<Self, TimerError> {
        let answer = Duration::try_from_secs_f64(answer_secs)
            .map_err(|_| TimerError::InvalidAnswerDuration)?;
        let review = Duration::try_from_secs_f64(review_secs)
            .map_err(|_| TimerError::InvalidReviewDuration)?;
        Self::new(answer, review)
    }

    #[must_use]
    pub fn answer(&self) -> Duration {
        self.answer
    }

    #[must_use]
    pub fn review(&self) -> Duration {
        self.review
    }
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerPhase {
    /// Before the first `start`. Never re-entered.
    #[default]
    NotStarted,
    Answering,
    Reviewing,
    /// Terminal for the current question; only `start` leaves it.
    ReviewEnded,
}

/// A phase change produced by one state evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: TimerPhase,
    pub to: TimerPhase,
}

//
// ─── TIMER ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct PhaseTimer {
    settings: TimerSettings,
    phase: TimerPhase,
    remaining: Duration,
    total: Duration,
}

impl PhaseTimer {
    #[must_use]
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            phase: TimerPhase::NotStarted,
            remaining: Duration::ZERO,
            total: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Remaining time over the active phase's total, in `[0, 1]`.
    ///
    /// Reads 0 before the first `start` and once the review has ended.
    #[must_use]
    pub fn fill_ratio(&self) -> f32 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.total.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Enters `Answering` with a full answer window.
    pub fn start(&mut self) {
        self.phase = TimerPhase::Answering;
        self.reset(self.settings.answer);
    }

    /// Advances the clock by `delta`, flooring at zero, then evaluates the
    /// phase. At most one transition happens per call; time beyond the end of
    /// a phase is not carried into the next one.
    pub fn tick(&mut self, delta: Duration) -> Option<PhaseTransition> {
        if matches!(self.phase, TimerPhase::Answering | TimerPhase::Reviewing) {
            self.remaining = self.remaining.saturating_sub(delta);
        }
        self.evaluate()
    }

    /// Forces the active phase to expire now.
    ///
    /// The transition is applied before this returns, so a cancel during
    /// `Answering` leaves the timer in `Reviewing` with a full review window.
    pub fn cancel(&mut self) -> Option<PhaseTransition> {
        if matches!(self.phase, TimerPhase::Answering | TimerPhase::Reviewing) {
            self.remaining = Duration::ZERO;
        }
        self.evaluate()
    }

    fn evaluate(&mut self) -> Option<PhaseTransition> {
        if !self.remaining.is_zero() {
            return None;
        }
        let from = self.phase;
        match from {
            TimerPhase::Answering => {
                self.phase = TimerPhase::Reviewing;
                self.reset(self.settings.review);
            }
            TimerPhase::Reviewing => {
                self.phase = TimerPhase::ReviewEnded;
                self.total = Duration::ZERO;
            }
            TimerPhase::NotStarted | TimerPhase::ReviewEnded => return None,
        }
        Some(PhaseTransition {
            from,
            to: self.phase,
        })
    }

    fn reset(&mut self, duration: Duration) {
        self.remaining = duration;
        self.total = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TimerSettings {
        TimerSettings::new(Duration::from_secs(10), Duration::from_secs(3)).unwrap()
    }

    #[test]
    fn rejects_zero_or_invalid_durations() {
        assert_eq!(
            TimerSettings::new(Duration::ZERO, Duration::from_secs(3)).unwrap_err(),
            TimerError::InvalidAnswerDuration
        );
        assert_eq!(
            TimerSettings::new(Duration::from_secs(10), Duration::ZERO).unwrap_err(),
            TimerError::InvalidReviewDuration
        );
        assert_eq!(
            TimerSettings::from_secs_f64(-1.0, 3.0).unwrap_err(),
            TimerError::InvalidAnswerDuration
        );
        assert_eq!(
            TimerSettings::from_secs_f64(10.0, f64::NAN).unwrap_err(),
            TimerError::InvalidReviewDuration
        );
        assert!(TimerSettings::from_secs_f64(0.5, 0.25).is_ok());
    }

    #[test]
    fn starts_not_started_until_start() {
        let mut timer = PhaseTimer::new(settings());
        assert_eq!(timer.phase(), TimerPhase::NotStarted);
        assert_eq!(timer.tick(Duration::from_secs(100)), None);
        assert_eq!(timer.cancel(), None);
        assert_eq!(timer.phase(), TimerPhase::NotStarted);
        assert_eq!(timer.fill_ratio(), 0.0);

        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Answering);
        assert_eq!(timer.remaining(), Duration::from_secs(10));
        assert_eq!(timer.fill_ratio(), 1.0);
    }

    #[test]
    fn full_cycle_via_ticks() {
        let mut timer = PhaseTimer::new(settings());
        timer.start();

        assert_eq!(timer.tick(Duration::from_secs(4)), None);
        assert!((timer.fill_ratio() - 0.6).abs() < 1e-6);

        let t = timer.tick(Duration::from_secs(6)).unwrap();
        assert_eq!((t.from, t.to), (TimerPhase::Answering, TimerPhase::Reviewing));
        assert_eq!(timer.remaining(), Duration::from_secs(3));
        assert_eq!(timer.fill_ratio(), 1.0);

        let t = timer.tick(Duration::from_secs(3)).unwrap();
        assert_eq!((t.from, t.to), (TimerPhase::Reviewing, TimerPhase::ReviewEnded));

        // terminal until restarted
        assert_eq!(timer.tick(Duration::from_secs(50)), None);
        assert_eq!(timer.phase(), TimerPhase::ReviewEnded);

        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Answering);
    }

    #[test]
    fn oversized_tick_does_not_skip_reviewing() {
        let mut timer = PhaseTimer::new(settings());
        timer.start();
        let t = timer.tick(Duration::from_secs(60)).unwrap();
        assert_eq!(t.to, TimerPhase::Reviewing);
        assert_eq!(timer.remaining(), Duration::from_secs(3));
    }

    #[test]
    fn cancel_moves_answering_to_reviewing_immediately() {
        let mut timer = PhaseTimer::new(settings());
        timer.start();
        timer.tick(Duration::from_secs(2));

        let t = timer.cancel().unwrap();
        assert_eq!((t.from, t.to), (TimerPhase::Answering, TimerPhase::Reviewing));
        assert_eq!(timer.remaining(), settings().review());
    }

    #[test]
    fn remaining_is_monotonic_within_a_phase() {
        let mut timer = PhaseTimer::new(settings());
        timer.start();
        let mut last = timer.remaining();
        for _ in 0..9 {
            timer.tick(Duration::from_millis(900));
            assert!(timer.remaining() <= last);
            last = timer.remaining();
        }
        assert_eq!(timer.phase(), TimerPhase::Answering);
    }

    #[test]
    fn phase_transition_law_holds_over_random_deltas() {
        let mut timer = PhaseTimer::new(settings());
        timer.start();
        let deltas = [7u64, 1, 900, 1, 2500, 3000, 10, 4, 9000, 1];
        let mut seen = Vec::new();
        for ms in deltas.iter().cycle().take(200) {
            if let Some(t) = timer.tick(Duration::from_millis(*ms * 13)) {
                seen.push(t);
            }
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].to, TimerPhase::Reviewing);
        assert_eq!(seen[1].to, TimerPhase::ReviewEnded);
    }
}
