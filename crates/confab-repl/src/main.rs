use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::mpsc;

use confab_engine::{ChatEngine, EngineConfig, EngineEvent, EventSink, Submission};
use confab_mock::{CannedReplySource, WELCOME_TEXT, demo_store};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/new".to_string(),
                "/sessions".to_string(),
                "/switch".to_string(),
                "/clear".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

async fn print_sessions(engine: &ChatEngine) {
    let active = engine.snapshot().await.active_session_id;
    let mut current_group = String::new();
    for session in engine.sessions().await {
        if session.group != current_group {
            println!("{}", session.group.bright_black());
            current_group = session.group.clone();
        }
        let marker = if active.as_deref() == Some(&session.id) {
            "*"
        } else {
            " "
        };
        println!(
            "  {} {}  {}  {}",
            marker.bright_green(),
            session.title,
            format!("({})", session.id).bright_black(),
            session.time_label.bright_black()
        );
    }
}

/// The main entry point for the Confab demo REPL.
///
/// Drives a [`ChatEngine`] over the seeded demo sessions with the canned
/// mock reply source. Typewriter output is printed live by a background
/// task consuming engine events, so `/switch` mid-reply demonstrates the
/// abort behavior: the printed reply just stops.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // ===== Engine Setup =====
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EngineEvent>();
    let engine = Arc::new(
        ChatEngine::new(Arc::new(demo_store()), Arc::new(CannedReplySource::new()))
            .with_config(EngineConfig {
                welcome_message: Some(WELCOME_TEXT.to_string()),
                ..EngineConfig::default()
            })
            .with_events(EventSink::new(event_tx)),
    );
    engine.select_session("session-1").await;

    // Background printer: live typewriter output and navigation notices.
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                EngineEvent::ReplyDelta { delta, .. } => {
                    print!("{}", delta.bright_blue());
                    let _ = std::io::stdout().flush();
                }
                EngineEvent::ReplyFinished { completed, .. } => {
                    if completed {
                        println!();
                    } else {
                        println!("{}", " [interrupted]".bright_black());
                    }
                }
                EngineEvent::SessionCreated { session } => {
                    println!("{}", format!("Created session: {}", session.id).green());
                }
                EngineEvent::SessionSwitched { session_id } => {
                    println!(
                        "{}",
                        format!("--- now in {} ---", session_id).bright_black()
                    );
                }
                EngineEvent::MessageAppended { .. } => {}
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Confab REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message, '/new', '/sessions', '/switch <id>', '/clear', or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/new" {
                    engine.create_session().await;
                    continue;
                }
                if trimmed == "/sessions" {
                    print_sessions(&engine).await;
                    continue;
                }
                if let Some(id) = trimmed.strip_prefix("/switch ") {
                    engine.select_session(id.trim()).await;
                    continue;
                }
                if trimmed == "/clear" {
                    if let Some(active) = engine.snapshot().await.active_session_id {
                        engine.clear_session(&active).await;
                        println!("{}", "Thread cleared.".bright_black());
                    }
                    continue;
                }
                if trimmed.starts_with('/') {
                    println!("{}", "Unknown command".bright_black());
                    continue;
                }

                let Some(session_id) = engine.snapshot().await.active_session_id else {
                    println!("{}", "No active session; use '/new' first.".yellow());
                    continue;
                };

                println!("{}", format!("> {}", trimmed).green());
                match engine.submit_text(&session_id, trimmed).await {
                    Ok(Submission::Accepted { .. }) => {}
                    Ok(Submission::DroppedBusy) => {
                        println!("{}", "Still replying; hold on.".yellow());
                    }
                    Ok(Submission::DroppedEmpty) => {}
                    Err(e) => {
                        eprintln!("{}", format!("Reply failed: {}", e).red());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    drop(engine);
    printer.abort();

    Ok(())
}
