//! Interactive question/answer session.
//!
//! Hosts one session controller for the lifetime of the process and
//! drives it from stdin. Lines starting with `/` are commands
//! (`/load <path>`, `/status`, `/quit`); everything else is sent to the
//! server as a question.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::session::{Session, SessionState};

pub async fn run_chat(config: &Config, initial_path: Option<&str>) -> Result<()> {
    let gateway = HttpGateway::new(&config.server)?;
    let mut session = Session::new(gateway);
    let interactive = atty::is(atty::Stream::Stdin);

    if interactive {
        println!("DevGPT chat — /load <path> to embed a repository, /status, /quit to exit.");
    }

    if let Some(path) = initial_path {
        session.initialize(path).await;
        report(session.state());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "/load" || line.starts_with("/load ") {
            // A bare "/load" passes an empty target through and is
            // rejected by the controller as invalid input.
            session.initialize(&line["/load".len()..]).await;
            report(session.state());
        } else if line == "/status" {
            print_status(session.state());
        } else if line == "/quit" || line == "/exit" {
            break;
        } else if line.starts_with('/') {
            eprintln!("Unknown command: {}", line);
        } else {
            session.ask(line).await;
            report(session.state());
        }
    }

    Ok(())
}

/// Print the outcome of the action that just resolved.
fn report(state: &SessionState) {
    match state {
        SessionState::Ready { chunks } => {
            println!("Embedded {} code chunks.", chunks);
        }
        SessionState::Answered { answer, .. } => {
            println!("{}", answer);
        }
        SessionState::Failed {
            phase,
            message,
            chunks,
            ..
        } => {
            eprintln!("{} failed: {}", phase.as_str(), message);
            if let Some(chunks) = chunks {
                eprintln!("(the previous index of {} chunks is still loaded)", chunks);
            }
        }
        // Actions resolve to one of the states above; the in-flight
        // states are never current between loop turns.
        _ => {}
    }
}

fn print_status(state: &SessionState) {
    match state {
        SessionState::Uninitialized => println!("No repository embedded yet."),
        SessionState::Embedding => println!("Embedding in progress."),
        SessionState::Ready { chunks } => {
            println!("Ready: {} chunks embedded.", chunks);
        }
        SessionState::Asking { chunks, .. } => {
            println!("Question in flight ({} chunks embedded).", chunks);
        }
        SessionState::Answered { chunks, .. } => {
            println!("Answered ({} chunks embedded).", chunks);
        }
        SessionState::Failed {
            phase,
            message,
            chunks,
            ..
        } => {
            println!("Last {} failed: {}", phase.as_str(), message);
            match chunks {
                Some(chunks) => println!("{} chunks embedded and usable.", chunks),
                None => println!("No repository embedded yet."),
            }
        }
    }
}
