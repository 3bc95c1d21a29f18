//! Narrow interfaces the session controller talks to.
//!
//! The presentation surface is an output sink only; player input reaches the
//! controller through [`crate::QuizSession::select`].

use quiz_core::TimerPhase;
use quiz_core::model::{OPTION_COUNT, OptionIndex, Score, SessionSummary};

use super::progress::SessionProgress;

/// Visual state of one answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStyle {
    Default,
    /// Marks the correct option during review.
    Highlighted,
}

/// Message shown in place of the question text once it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    TimeUp,
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Oh... Incorrect!",
            Feedback::TimeUp => "Time's up!",
        }
    }
}

pub trait PresentationSurface {
    fn show_question(&mut self, text: &str, options: &[String; OPTION_COUNT]);

    fn set_option_style(&mut self, index: OptionIndex, style: OptionStyle);

    fn set_input_enabled(&mut self, enabled: bool);

    fn show_feedback(&mut self, feedback: Feedback);

    fn show_score(&mut self, score: &Score);

    fn show_progress(&mut self, progress: &SessionProgress);

    /// Countdown widget; `fill_ratio` is in `[0, 1]`.
    fn show_timer(&mut self, fill_ratio: f32, phase: TimerPhase);
}

/// Owner of the screens around the quiz.
///
/// Restart and quit are driven by the host itself; the controller only
/// reports the end of a session.
pub trait SessionHost {
    /// Called exactly once, when the pool is exhausted.
    fn game_over(&mut self, summary: &SessionSummary);
}

impl<T: PresentationSurface + ?Sized> PresentationSurface for &mut T {
    fn show_question(&mut self, text: &str, options: &[String; OPTION_COUNT]) {
        (**self).show_question(text, options);
    }

    fn set_option_style(&mut self, index: OptionIndex, style: OptionStyle) {
        (**self).set_option_style(index, style);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        (**self).set_input_enabled(enabled);
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        (**self).show_feedback(feedback);
    }

    fn show_score(&mut self, score: &Score) {
        (**self).show_score(score);
    }

    fn show_progress(&mut self, progress: &SessionProgress) {
        (**self).show_progress(progress);
    }

    fn show_timer(&mut self, fill_ratio: f32, phase: TimerPhase) {
        (**self).show_timer(fill_ratio, phase);
    }
}

impl<T: SessionHost + ?Sized> SessionHost for &mut T {
    fn game_over(&mut self, summary: &SessionSummary) {
        (**self).game_over(summary);
    }
}
