//! Line-oriented stdout rendering for the quiz.

use quiz_core::TimerPhase;
use quiz_core::model::{OPTION_COUNT, OptionIndex, Score, SessionSummary};
use services::{Feedback, OptionStyle, PresentationSurface, SessionHost, SessionProgress};

const TIMER_SEGMENTS: usize = 4;
const PROGRESS_WIDTH: usize = 10;

/// Prints each change once; widgets that update every tick only print when
/// their visible value changes.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    options: Vec<String>,
    input_enabled: bool,
    last_score: Option<Score>,
    last_segments: Option<usize>,
    last_phase: Option<TimerPhase>,
}

impl TerminalSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.input_enabled
    }
}

fn timer_bar(fill_ratio: f32) -> (usize, String) {
    // fill_ratio is clamped to [0, 1] by the timer
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (fill_ratio * TIMER_SEGMENTS as f32).ceil() as usize;
    let filled = filled.min(TIMER_SEGMENTS);
    let bar = "#".repeat(filled) + &".".repeat(TIMER_SEGMENTS - filled);
    (filled, bar)
}

fn progress_line(progress: &SessionProgress) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((progress.ratio() * PROGRESS_WIDTH as f32).round() as usize).min(PROGRESS_WIDTH);
    format!(
        "Question {}/{} [{}{}]",
        progress.visited,
        progress.total,
        "=".repeat(filled),
        " ".repeat(PROGRESS_WIDTH - filled)
    )
}

impl PresentationSurface for TerminalSurface {
    fn show_question(&mut self, text: &str, options: &[String; OPTION_COUNT]) {
        self.options = options.to_vec();
        println!();
        println!("{text}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }
    }

    fn set_option_style(&mut self, index: OptionIndex, style: OptionStyle) {
        if style == OptionStyle::Highlighted {
            let label = self.options.get(index.get()).map_or("", String::as_str);
            println!("Correct answer: {}) {label}", index.get() + 1);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        println!("{}", feedback.message());
    }

    fn show_score(&mut self, score: &Score) {
        if self.last_score.as_ref() != Some(score) {
            println!("{}", score.display_text());
            self.last_score = Some(*score);
        }
    }

    fn show_progress(&mut self, progress: &SessionProgress) {
        if !progress.is_complete {
            println!("{}", progress_line(progress));
        }
    }

    fn show_timer(&mut self, fill_ratio: f32, phase: TimerPhase) {
        if phase != TimerPhase::Answering {
            self.last_phase = Some(phase);
            self.last_segments = None;
            return;
        }
        let (segments, bar) = timer_bar(fill_ratio);
        if self.last_phase != Some(phase) || self.last_segments != Some(segments) {
            println!("[{bar}]");
        }
        self.last_phase = Some(phase);
        self.last_segments = Some(segments);
    }
}

/// Game-over screen. The main loop owns restart and quit.
#[derive(Debug, Default)]
pub struct TerminalHost {
    games_finished: u32,
}

impl TerminalHost {
    #[must_use]
    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }
}

impl SessionHost for TerminalHost {
    fn game_over(&mut self, summary: &SessionSummary) {
        self.games_finished += 1;
        println!();
        println!("{}", summary.message());
        println!("Type r to play again or q to quit.");
    }
}
