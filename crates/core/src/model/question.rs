use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {OPTION_COUNT} answer options, found {found}")]
    WrongOptionCount { found: usize },

    #[error("answer option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct answer index {index} is outside 0..{OPTION_COUNT}")]
    CorrectIndexOutOfRange { index: i64 },
}

//
// ─── OPTION INDEX ──────────────────────────────────────────────────────────────
//

/// Index of one of the four answer options, always in `0..OPTION_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// Returns `None` when `index` does not name an option.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        if index < OPTION_COUNT {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// All option indices in display order.
    pub fn all() -> impl Iterator<Item = OptionIndex> {
        (0..OPTION_COUNT).filter_map(OptionIndex::new)
    }
}

impl TryFrom<i64> for OptionIndex {
    type Error = QuestionError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        usize::try_from(raw)
            .ok()
            .and_then(OptionIndex::new)
            .ok_or(QuestionError::CorrectIndexOutOfRange { index: raw })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; OPTION_COUNT],
    correct: OptionIndex,
}

impl Question {
    /// Builds a question from loosely-typed source data.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or any option is blank, if there are
    /// not exactly four options, or if `correct_index` is not in `0..4`.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: i64,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|rejected: Vec<String>| QuestionError::WrongOptionCount {
                found: rejected.len(),
            })?;
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        let correct = OptionIndex::try_from(correct_index)?;

        Ok(Self {
            id,
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.get()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, selected: OptionIndex) -> bool {
        self.correct == selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Red".into(), "Green".into(), "Blue".into(), "Black".into()]
    }

    #[test]
    fn builds_valid_question() {
        let q = Question::new(QuestionId::new(0), "Sky colour?", options(), 2).unwrap();
        assert_eq!(q.text(), "Sky colour?");
        assert_eq!(q.correct().get(), 2);
        assert_eq!(q.option(q.correct()), "Blue");
        assert!(q.is_correct(OptionIndex::new(2).unwrap()));
        assert!(!q.is_correct(OptionIndex::new(0).unwrap()));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let mut opts = options();
        opts.pop();
        let err = Question::new(QuestionId::new(0), "Q", opts, 0).unwrap_err();
        assert_eq!(err, QuestionError::WrongOptionCount { found: 3 });
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        for bad in [-1, 4, 99] {
            let err = Question::new(QuestionId::new(0), "Q", options(), bad).unwrap_err();
            assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: bad });
        }
    }

    #[test]
    fn rejects_blank_text_and_options() {
        assert_eq!(
            Question::new(QuestionId::new(0), "   ", options(), 0).unwrap_err(),
            QuestionError::EmptyText
        );

        let mut opts = options();
        opts[1] = String::new();
        assert_eq!(
            Question::new(QuestionId::new(0), "Q", opts, 0).unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
    }

    #[test]
    fn option_index_bounds() {
        assert!(OptionIndex::new(3).is_some());
        assert!(OptionIndex::new(4).is_none());
        assert_eq!(OptionIndex::all().count(), OPTION_COUNT);
    }
}
