//! Recording fakes for the presentation surface and session host.

use quiz_core::TimerPhase;
use quiz_core::model::{OPTION_COUNT, OptionIndex, Question, QuestionId, Score, SessionSummary};

use super::progress::SessionProgress;
use super::surface::{Feedback, OptionStyle, PresentationSurface, SessionHost};

#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub question: Option<String>,
    pub options: Vec<String>,
    pub styles: [OptionStyle; OPTION_COUNT],
    pub highlight_calls: usize,
    pub input_enabled: bool,
    pub feedback: Vec<Feedback>,
    pub score: Score,
    pub progress: Option<SessionProgress>,
    pub fill_ratios: Vec<f32>,
    pub last_phase: Option<TimerPhase>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            question: None,
            options: Vec::new(),
            styles: [OptionStyle::Default; OPTION_COUNT],
            highlight_calls: 0,
            input_enabled: false,
            feedback: Vec::new(),
            score: Score::default(),
            progress: None,
            fill_ratios: Vec::new(),
            last_phase: None,
        }
    }
}

impl RecordingSurface {
    pub fn highlighted(&self) -> Vec<usize> {
        OptionIndex::all()
            .filter(|i| self.styles[i.get()] == OptionStyle::Highlighted)
            .map(OptionIndex::get)
            .collect()
    }
}

impl PresentationSurface for RecordingSurface {
    fn show_question(&mut self, text: &str, options: &[String; OPTION_COUNT]) {
        self.question = Some(text.to_owned());
        self.options = options.to_vec();
    }

    fn set_option_style(&mut self, index: OptionIndex, style: OptionStyle) {
        if style == OptionStyle::Highlighted {
            self.highlight_calls += 1;
        }
        self.styles[index.get()] = style;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    fn show_score(&mut self, score: &Score) {
        self.score = *score;
    }

    fn show_progress(&mut self, progress: &SessionProgress) {
        self.progress = Some(*progress);
    }

    fn show_timer(&mut self, fill_ratio: f32, phase: TimerPhase) {
        self.fill_ratios.push(fill_ratio);
        self.last_phase = Some(phase);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub summaries: Vec<SessionSummary>,
}

impl SessionHost for RecordingHost {
    fn game_over(&mut self, summary: &SessionSummary) {
        self.summaries.push(summary.clone());
    }
}

pub(crate) fn build_question(id: u64, correct: i64) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}"),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct,
    )
    .unwrap()
}
