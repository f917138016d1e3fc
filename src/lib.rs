//! # DevGPT Client
//!
//! A client for the DevGPT code-explanation service. Point it at a
//! source directory, have the server chunk and embed it, then ask
//! natural-language questions answered by retrieval-augmented
//! generation over those chunks.
//!
//! All of the heavy machinery (chunking, embeddings, vector search,
//! the LLM) lives on the server behind two JSON endpoints; this crate
//! is the client-side interaction protocol that sequences them.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌─────────────┐   ┌───────────┐
//! │    CLI    │──▶│  Session   │──▶│   Gateway   │──▶│  DevGPT   │
//! │ embed/ask │   │ controller │   │ (HTTP/JSON) │   │  server   │
//! │   /chat   │   │ (state)    │   │             │   │           │
//! └───────────┘   └────────────┘   └─────────────┘   └───────────┘
//! ```
//!
//! The session controller owns a single [`session::SessionState`]
//! value: embed-before-ask ordering, one request in flight at a time,
//! and what survives a failure are all encoded in its transitions. The
//! gateway translates the two intents into HTTP calls and normalizes
//! every outcome into [`gateway::GatewayError`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | Workflow state machine and session controller |
//! | [`gateway`] | HTTP gateway and error normalization |
//! | [`config`] | TOML configuration parsing |
//! | [`chat`] | Interactive question/answer loop |
//! | [`embed_cmd`] | One-shot `devgpt embed` command |
//! | [`ask_cmd`] | One-shot `devgpt ask` command |

pub mod ask_cmd;
pub mod chat;
pub mod config;
pub mod embed_cmd;
pub mod gateway;
pub mod session;
