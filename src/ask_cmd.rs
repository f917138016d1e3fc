//! One-shot `devgpt ask` command.
//!
//! The server only answers questions about a repository embedded in its
//! current process, so a one-shot ask embeds first and then asks within
//! the same session.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::session::{Session, SessionState};

pub async fn run_ask(config: &Config, path: &str, question: &str) -> Result<()> {
    let gateway = HttpGateway::new(&config.server)?;
    let mut session = Session::new(gateway);

    session.initialize(path).await;
    if let SessionState::Failed { message, .. } = session.state() {
        bail!("embed failed: {}", message);
    }

    session.ask(question).await;

    match session.state() {
        SessionState::Answered { answer, .. } => {
            println!("{}", answer);
            Ok(())
        }
        SessionState::Failed { message, .. } => bail!("ask failed: {}", message),
        _ => bail!("ask did not complete"),
    }
}
