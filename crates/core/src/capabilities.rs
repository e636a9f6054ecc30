//! Capability boundaries consumed by the session engine.
//!
//! The engine never talks to a network or a terminal directly. Everything it
//! needs from the outside world comes through these traits: a web search
//! provider, a text-generation model, and whatever user interface is driving
//! the session. Concrete implementations live in [`crate::search`],
//! [`crate::generation`], and in the surface crates.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[cfg(test)]
use mockall::automock;

/// One retrieved reference document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A web search provider. Zero hits is a normal outcome (`Ok(vec![])`);
/// network or auth failures are errors and become fatal at the engine
/// boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// An opaque text-generation capability. Each call pairs a fixed system
/// instruction with per-call user content and returns prose (or, for quiz
/// authoring, JSON the caller parses).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_content: &str) -> Result<String>;
}

/// Failure modes of the user-facing input capability.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The user interrupted or disconnected at a suspension point. Not a
    /// failure; the engine unwinds to a clean terminal state.
    #[error("input interrupted by user")]
    Interrupted,
    #[error("input channel failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The surface driving the session: blocking prompts in, rendered text out.
#[async_trait]
pub trait UserInterface: Send + Sync {
    /// Ask the user for free text.
    async fn prompt(&self, description: &str) -> Result<String, PromptError>;

    /// Ask the user to select zero or more of the given options, returning
    /// 0-based indices. Implementations should keep the returned indices
    /// within range; the engine re-prompts if they are not.
    async fn prompt_multi_select(
        &self,
        description: &str,
        options: &[String],
    ) -> Result<BTreeSet<usize>, PromptError>;

    /// Render text to the user. Fire-and-forget; the engine consumes no
    /// return value.
    async fn display(&self, text: &str);
}
