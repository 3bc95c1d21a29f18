use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use storage::json::DEFAULT_QUESTIONS_FILE;

const DEFAULT_ANSWER_SECS: f64 = 10.0;
const DEFAULT_REVIEW_SECS: f64 = 3.0;
const DEFAULT_TICK_MS: u64 = 50;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { flag: &'static str, raw: String },
    InvalidTick { raw: String },
    EmptyPath,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidTick { raw } => write!(f, "invalid --tick-ms value: {raw}"),
            ArgsError::EmptyPath => write!(f, "--questions cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub enum Command {
    Play(Args),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub questions: PathBuf,
    /// Kept raw so that non-positive values reach session setup and are
    /// reported there as configuration errors.
    pub answer_secs: f64,
    pub review_secs: f64,
    pub tick: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            questions: PathBuf::from(DEFAULT_QUESTIONS_FILE),
            answer_secs: DEFAULT_ANSWER_SECS,
            review_secs: DEFAULT_REVIEW_SECS,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>] [--answer-secs <s>] [--review-secs <s>] [--tick-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS_FILE}");
    eprintln!("  --answer-secs {DEFAULT_ANSWER_SECS}");
    eprintln!("  --review-secs {DEFAULT_REVIEW_SECS}");
    eprintln!("  --tick-ms {DEFAULT_TICK_MS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS, QUIZ_ANSWER_SECS, QUIZ_REVIEW_SECS, QUIZ_TICK_MS, RUST_LOG");
    eprintln!();
    eprintln!("In game: type 1-4 and Enter to answer, q to quit; r restarts after game over.");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_secs(flag: &'static str, raw: String) -> Result<f64, ArgsError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ArgsError::InvalidSeconds { flag, raw })
}

fn parse_tick(raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ArgsError::InvalidTick { raw }),
    }
}

impl Args {
    /// Resolve settings from defaults, then `env`, then `args`.
    ///
    /// `env` is a lookup so tests do not have to touch the process environment.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut parsed = Self::default();

        if let Some(v) = env("QUIZ_QUESTIONS").filter(|v| !v.trim().is_empty()) {
            parsed.questions = PathBuf::from(v);
        }
        if let Some(v) = env("QUIZ_ANSWER_SECS") {
            parsed.answer_secs = parse_secs("QUIZ_ANSWER_SECS", v)?;
        }
        if let Some(v) = env("QUIZ_REVIEW_SECS") {
            parsed.review_secs = parse_secs("QUIZ_REVIEW_SECS", v)?;
        }
        if let Some(v) = env("QUIZ_TICK_MS") {
            parsed.tick = parse_tick(v)?;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = require_value(&mut args, "--questions")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyPath);
                    }
                    parsed.questions = PathBuf::from(value);
                }
                "--answer-secs" => {
                    let value = require_value(&mut args, "--answer-secs")?;
                    parsed.answer_secs = parse_secs("--answer-secs", value)?;
                }
                "--review-secs" => {
                    let value = require_value(&mut args, "--review-secs")?;
                    parsed.review_secs = parse_secs("--review-secs", value)?;
                }
                "--tick-ms" => {
                    let value = require_value(&mut args, "--tick-ms")?;
                    parsed.tick = parse_tick(value)?;
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Play(parsed))
    }
}
