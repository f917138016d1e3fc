//! # DevGPT CLI (`devgpt`)
//!
//! The `devgpt` binary talks to a running DevGPT server: it has the
//! server chunk and embed a source directory, then asks it questions.
//!
//! ## Usage
//!
//! ```bash
//! devgpt --config ./config/devgpt.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `devgpt embed <path>` | Chunk and embed a repository on the server |
//! | `devgpt ask --path <path> "<question>"` | Embed, then ask a single question |
//! | `devgpt chat [--path <path>]` | Interactive session: `/load <path>`, then ask away |
//!
//! ## Examples
//!
//! ```bash
//! # Warm the server with a repository
//! devgpt embed ./frontend/src
//!
//! # One-shot question
//! devgpt ask --path ./core "How does the login flow work?"
//!
//! # Interactive session against a non-default server
//! devgpt --server http://devgpt.internal:8080 chat --path ./core
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use devgpt_client::config::{load_config, Config};
use devgpt_client::{ask_cmd, chat, embed_cmd};

/// DevGPT client — embed a repository on a DevGPT server and ask it
/// natural-language questions.
#[derive(Parser)]
#[command(
    name = "devgpt",
    about = "Client for the DevGPT code-explanation service",
    version,
    long_about = "DevGPT answers natural-language questions about a codebase using \
    retrieval-augmented generation. The server does the chunking, embedding, retrieval, \
    and LLM work; this client drives it: embed a source directory first, then ask questions."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/devgpt.toml`; when the default path does
    /// not exist, built-in defaults are used instead.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overriding the configuration file.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Chunk and embed a repository on the server.
    ///
    /// Prints the number of chunks the server produced. The server
    /// keeps the embedded chunks in memory for subsequent questions.
    Embed {
        /// Path of the repository, as visible to the server.
        path: String,
    },

    /// Embed a repository, then ask a single question about it.
    Ask {
        /// Path of the repository, as visible to the server.
        #[arg(long)]
        path: String,

        /// The question to ask.
        question: String,
    },

    /// Start an interactive question/answer session.
    ///
    /// `/load <path>` embeds a repository, `/status` shows the session
    /// state, `/quit` exits. Any other line is sent as a question.
    Chat {
        /// Repository to embed before the first prompt.
        #[arg(long)]
        path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicitly passed config file must exist; the default path is
    // allowed to be absent.
    let mut config = match cli.config {
        Some(path) => load_config(&path)?,
        None => {
            let default = PathBuf::from("./config/devgpt.toml");
            if default.exists() {
                load_config(&default)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    match cli.command {
        Commands::Embed { path } => embed_cmd::run_embed(&config, &path).await,
        Commands::Ask { path, question } => ask_cmd::run_ask(&config, &path, &question).await,
        Commands::Chat { path } => chat::run_chat(&config, path.as_deref()).await,
    }
}
