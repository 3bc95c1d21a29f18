#![forbid(unsafe_code)]

mod args;
mod terminal;

use services::{Clock, QuizLoopService, QuizSession};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command, print_usage};
use crate::terminal::{TerminalHost, TerminalSurface};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    /// Zero-based option index.
    Answer(usize),
    Restart,
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" => Input::Quit,
            "r" | "restart" => Input::Restart,
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map_or(Input::Unknown, Input::Answer),
        }
    }
}

type TerminalSession = QuizSession<TerminalSurface, TerminalHost>;

/// Apply one input line. Returns `false` when the player quits.
///
/// A failed reload on restart is reported and leaves the game-over screen up,
/// so the player can retry or quit.
async fn handle_input(input: Input, session: &mut TerminalSession, quiz: &QuizLoopService) -> bool {
    match input {
        Input::Quit => return false,
        Input::Restart if session.is_over() => {
            if let Err(err) = quiz.restart(session).await {
                tracing::warn!(error = %err, "restart failed");
                println!("Could not reload questions: {err}");
                println!("Type r to try again or q to quit.");
            }
        }
        Input::Answer(index) if !session.is_over() => {
            let outcome = session.select(index);
            tracing::debug!(index, ?outcome, "player input");
        }
        other => tracing::debug!(?other, "input ignored"),
    }
    true
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::json(&args.questions);
    let quiz = QuizLoopService::with_durations(
        Clock::system(),
        storage.questions,
        args.answer_secs,
        args.review_secs,
    )?;

    let mut session = quiz
        .start_session(TerminalSurface::new(), TerminalHost::default())
        .await?;

    let mut ticker = tokio::time::interval(args.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            // input is drained before the tick so a selection made in the
            // same frame as the timeout still counts
            biased;

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_input(Input::parse(&line), &mut session, &quiz).await {
                    break;
                }
            }
            now = ticker.tick() => {
                let delta = now.saturating_duration_since(last_tick);
                last_tick = now;
                session.tick(delta);
            }
        }
    }

    tracing::info!(games = session.host().games_finished(), "quitting");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = match Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    let args = match command {
        Command::Help => {
            print_usage();
            return;
        }
        Command::Play(args) => args,
    };

    if let Err(err) = run(args).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
