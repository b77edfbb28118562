// prompt/listener.rs

use crate::orchestrator::SearchState;
use crate::prompt::command_handler::{handle_command, parse_command, Outcome};
use crate::prompt::Session;
use crate::render::render_state;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Reads commands from stdin until `:quit` or end of input.
pub async fn listen_for_commands(session: &Session) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("stdin closed, leaving prompt");
                break;
            }
            Err(e) => {
                warn!("stdin read error: {:?}", e);
                break;
            }
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                print_prompt();
                continue;
            }
        };

        match handle_command(command, session).await {
            Outcome::Continue(Some(output)) => {
                println!("{}", output);
                print_prompt();
            }
            // Searches settle through the renderer, which prints the next prompt.
            Outcome::Continue(None) => {}
            Outcome::Quit => break,
        }
    }
}

const PROMPT: &str = "> ";

fn print_prompt() {
    print!("{}", PROMPT);
    if let Err(e) = std::io::stdout().flush() {
        warn!("stdout flush failed: {:?}", e);
    }
}

/// What the renderer prints for one state. Settled states end with the next prompt.
fn renderer_output(state: &SearchState, chart_width: usize) -> Option<String> {
    let output = render_state(state, chart_width);
    if output.is_empty() {
        return None;
    }
    if state.loading {
        Some(output)
    } else {
        Some(format!("{}\n{}", output, PROMPT))
    }
}

/// Prints every published search state until the orchestrator goes away.
pub fn spawn_renderer(mut updates: watch::Receiver<SearchState>, chart_width: usize) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("▶️ Starting renderer...");
        while updates.changed().await.is_ok() {
            let output = renderer_output(&updates.borrow_and_update(), chart_width);
            if let Some(output) = output {
                print!("\n{}", output);
                if !output.ends_with(PROMPT) {
                    println!();
                }
                if let Err(e) = std::io::stdout().flush() {
                    warn!("stdout flush failed: {:?}", e);
                }
            }
        }
        info!("🛑 Renderer ended.");
    })
}
