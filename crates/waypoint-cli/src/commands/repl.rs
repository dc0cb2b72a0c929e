//! Interactive chat REPL with recording controls.
//!
//! Plain input is sent to the chatbot; slash commands drive test mode and
//! the recording session:
//!
//! - `/test`   toggle test mode (stops an active recording first)
//! - `/record` start a recording session
//! - `/stop`   stop the session and show the report
//! - `/status` show the recorder status line
//! - `/quit`   leave the chat

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use waypoint_api::types::ChatHistoryMessage;
use waypoint_core::capability::{CHAT_ROUTE, Capability};
use waypoint_recorder::{ChatProducer, RecorderError, presenter};

use super::App;

/// CLI helper for rustyline that provides completion and highlighting.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/test".to_string(),
                "/record".to_string(),
                "/stop".to_string(),
                "/status".to_string(),
                "/quit".to_string(),
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
}

impl Validator for CliHelper {}

pub async fn run(app: &mut App) -> Result<()> {
    let mut editor: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CliHelper::new()));

    let user_id = app.user_id().await;
    let producer = ChatProducer::new(app.client.chatbot().clone(), app.recorder.clone());

    let mut history: Vec<ChatHistoryMessage> = Vec::new();
    let mut conversation_id: Option<String> = None;

    println!("{}", "Waypoint career chat".bold());
    println!("Type a message, or /test /record /stop /status /quit\n");

    loop {
        app.drain_events();

        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        match line {
            "/quit" | "/exit" => break,
            "/test" => toggle_test_mode(app).await,
            "/record" => {
                let hint = user_id.map(|id| id.to_string());
                if let Err(e) = app.recorder.start_recording(hint.as_deref()).await {
                    println!("{}", e.to_string().red());
                }
            }
            "/stop" => match app.recorder.stop_recording().await {
                Ok(report) => show_report(Some(&report)),
                Err(e) => println!("{}", e.to_string().red()),
            },
            "/status" => {
                let snapshot = app.recorder.snapshot().await;
                match presenter::render_status(&snapshot, Capability::from_route(CHAT_ROUTE)) {
                    Some(status) => println!("{status}"),
                    None => println!("Test mode is off"),
                }
            }
            command if command.starts_with('/') => {
                println!("Unknown command: {command}");
            }
            message => {
                match producer
                    .send(CHAT_ROUTE, message, &history, user_id, conversation_id.as_deref())
                    .await
                {
                    Ok(reply) => {
                        if let Some(text) = &reply.reply {
                            println!("{}\n", text);
                        }
                        if reply.history_update.is_empty() {
                            history.push(ChatHistoryMessage::user(message));
                            if let Some(text) = reply.reply {
                                history.push(ChatHistoryMessage::assistant(text));
                            }
                        } else {
                            history = reply.history_update;
                        }
                        if reply.conversation_id.is_some() {
                            conversation_id = reply.conversation_id;
                        }
                    }
                    Err(e) => println!("{}", e.reason().red()),
                }
            }
        }
    }

    // Leaving with a live session would strand it on the backend.
    if app.recorder.snapshot().await.is_recording {
        println!("Stopping the active recording session...");
        match app.recorder.stop_recording().await {
            Ok(report) => show_report(Some(&report)),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
    app.drain_events();

    Ok(())
}

async fn toggle_test_mode(app: &App) {
    let snapshot = app.recorder.snapshot().await;
    if snapshot.test_mode {
        match app.recorder.disable_test_mode().await {
            Ok(report) => show_report(report.as_ref()),
            Err(RecorderError::Backend(reason)) => println!("{}", reason.red()),
            Err(e) => println!("{}", e.to_string().red()),
        }
    } else {
        app.recorder.enable_test_mode().await;
    }
}

fn show_report(report: Option<&waypoint_core::report::Report>) {
    if let Some(rendered) = presenter::render_report(report) {
        println!("\n{rendered}");
    }
}
