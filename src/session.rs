//! Session workflow state machine.
//!
//! A session moves through a fixed workflow: embed a repository first,
//! then ask questions about it. [`Session`] owns the single
//! [`SessionState`] value, is the only place that transitions it, and
//! is generic over the [`Gateway`] seam so the whole machine can be
//! driven by a scripted gateway in tests.
//!
//! # State machine
//!
//! ```text
//! Uninitialized ──initialize ok──▶ Ready
//! Uninitialized ──initialize err─▶ Failed(Embed)
//! Ready/Answered/Failed ──initialize ok──▶ Ready      (answer cleared)
//! Ready/Answered/Failed ──initialize err─▶ Failed(Embed, count kept)
//! Ready/Answered/Failed(count kept) ──ask ok──▶ Answered
//! Ready/Answered/Failed(count kept) ──ask err─▶ Failed(Ask, count + answer kept)
//! any ──precondition violation──▶ Failed(…)  (synchronous, no request)
//! ```
//!
//! There is no terminal state; the machine lives as long as the hosting
//! process.
//!
//! # Preconditions
//!
//! Both actions validate before touching the network. An action
//! attempted while another request is in flight is rejected with
//! `"busy"`, never queued, so results always apply in the order their
//! actions were accepted. `ask` additionally requires a chunk count in
//! the current state: asking from `Uninitialized` or `Embedding` yields
//! `"not initialized"` regardless of input. Empty (after trimming)
//! targets and questions yield `"invalid input"`.
//!
//! # What survives a failure
//!
//! A chunk count established by a successful embed is kept through ask
//! failures and through failed re-embeds, so one failed retry never
//! strands an already-usable session. The last good answer is kept
//! through ask failures too; it is cleared the instant a new embed is
//! accepted, not when an ask begins.

use crate::gateway::{Gateway, GatewayError};

/// Which of the two remote operations a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Embed,
    Ask,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Embed => "embed",
            Phase::Ask => "ask",
        }
    }
}

/// The single source of truth for what a session may do next and what
/// a renderer may show.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No repository has been embedded yet.
    Uninitialized,
    /// An embed request is in flight. Any stale chunk count and answer
    /// have already been dropped; a fresh embed supersedes them.
    Embedding,
    /// A repository is embedded and ready for questions.
    Ready { chunks: u64 },
    /// An ask request is in flight. The previous answer is still
    /// presentable while we wait.
    Asking { chunks: u64, last_answer: Option<String> },
    /// The last ask succeeded.
    Answered { chunks: u64, answer: String },
    /// The last action failed. `chunks` and `last_answer` carry
    /// whatever earlier successes are still usable.
    Failed {
        phase: Phase,
        message: String,
        chunks: Option<u64>,
        last_answer: Option<String>,
    },
}

impl SessionState {
    /// Chunk count from the most recent successful embed still in
    /// effect, if any. `Some` here is exactly the `ask` gate.
    pub fn chunks(&self) -> Option<u64> {
        match self {
            SessionState::Uninitialized | SessionState::Embedding => None,
            SessionState::Ready { chunks }
            | SessionState::Asking { chunks, .. }
            | SessionState::Answered { chunks, .. } => Some(*chunks),
            SessionState::Failed { chunks, .. } => *chunks,
        }
    }

    /// The most recent successful answer still in effect, if any.
    pub fn last_answer(&self) -> Option<&str> {
        match self {
            SessionState::Answered { answer, .. } => Some(answer),
            SessionState::Asking { last_answer, .. }
            | SessionState::Failed { last_answer, .. } => last_answer.as_deref(),
            _ => None,
        }
    }

    /// Whether a remote request is currently outstanding.
    pub fn in_flight(&self) -> bool {
        matches!(self, SessionState::Embedding | SessionState::Asking { .. })
    }
}

/// Owns the workflow state and sequences the two remote operations.
pub struct Session<G> {
    gateway: G,
    state: SessionState,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Reject an action before it reaches the gateway, keeping whatever
    /// chunk count and answer the current state still carries.
    fn reject(&mut self, phase: Phase, message: &str) {
        self.state = SessionState::Failed {
            phase,
            message: message.to_string(),
            chunks: self.state.chunks(),
            last_answer: self.state.last_answer().map(str::to_string),
        };
    }

    /// Embed a repository on the server. Leaves the session `Ready` on
    /// success and `Failed(Embed)` otherwise; never returns an error to
    /// the caller.
    pub async fn initialize(&mut self, target: &str) {
        if self.state.in_flight() {
            self.reject(Phase::Embed, "busy");
            return;
        }
        let target = target.trim();
        if target.is_empty() {
            self.reject(Phase::Embed, "invalid input");
            return;
        }

        // Accepted: the answer is cleared here, and the old count leaves
        // the state so it cannot be mistaken for the new index. It is
        // restored on failure.
        let previous = self.state.chunks();
        self.state = SessionState::Embedding;

        match self.gateway.embed(target).await {
            Ok(chunks) => self.state = SessionState::Ready { chunks },
            Err(e) => self.state = failed(Phase::Embed, &e, previous, None),
        }
    }

    /// Ask a question about the embedded repository. Requires a prior
    /// successful embed; leaves the session `Answered` on success and
    /// `Failed(Ask)` otherwise.
    pub async fn ask(&mut self, question: &str) {
        // Gating before validation: asking with nothing embedded is
        // "not initialized" no matter what the input looks like.
        let chunks = match self.state.chunks() {
            Some(chunks) => chunks,
            None => {
                self.reject(Phase::Ask, "not initialized");
                return;
            }
        };
        if self.state.in_flight() {
            self.reject(Phase::Ask, "busy");
            return;
        }
        let question = question.trim();
        if question.is_empty() {
            self.reject(Phase::Ask, "invalid input");
            return;
        }

        let last_answer = self.state.last_answer().map(str::to_string);
        self.state = SessionState::Asking {
            chunks,
            last_answer: last_answer.clone(),
        };

        match self.gateway.ask(question).await {
            Ok(answer) => self.state = SessionState::Answered { chunks, answer },
            Err(e) => self.state = failed(Phase::Ask, &e, Some(chunks), last_answer),
        }
    }
}

fn failed(
    phase: Phase,
    error: &GatewayError,
    chunks: Option<u64>,
    last_answer: Option<String>,
) -> SessionState {
    SessionState::Failed {
        phase,
        message: error.to_string(),
        chunks,
        last_answer,
    }
}
