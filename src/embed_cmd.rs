//! One-shot `devgpt embed` command.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::session::{Session, SessionState};

/// Embed a repository on the server and report the chunk count.
pub async fn run_embed(config: &Config, path: &str) -> Result<()> {
    let gateway = HttpGateway::new(&config.server)?;
    let mut session = Session::new(gateway);

    session.initialize(path).await;

    match session.state() {
        SessionState::Ready { chunks } => {
            println!("Embedded {} code chunks.", chunks);
            Ok(())
        }
        SessionState::Failed { message, .. } => bail!("embed failed: {}", message),
        _ => bail!("embed did not complete"),
    }
}
