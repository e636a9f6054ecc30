//! The mutable data record for one traversal of the conversation graph.

use crate::capabilities::SearchResult;
use crate::grading::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One comprehension-check item produced by the quiz-authoring capability.
///
/// Option order is significant and stable across rendering and grading.
/// `correct_answers` holds 0-based indices into `options`; at least two
/// correct answers is an authoring convention the prompt requests, not an
/// invariant the engine enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: BTreeSet<usize>,
    #[serde(default)]
    pub explanation: String,
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub content: String,
}

/// Append-only log of conversational turns. It accumulates across loop
/// iterations and is the only state that survives [`Session::reset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn push(&mut self, speaker: Speaker, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker,
            content: content.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The session data store, owned exclusively by one `SessionEngine` for its
/// lifetime. Each field is written by exactly one state handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Patient-chosen subject; non-empty once the entry state completes.
    pub topic: String,
    /// Raw search results. Empty on zero hits, never absent after retrieval.
    pub reference_material: Vec<SearchResult>,
    /// Patient-facing prose derived from the reference material.
    pub summary: String,
    /// `None` until quiz generation succeeds.
    pub quiz: Option<QuizItem>,
    /// Indices the patient selected. The empty set is a legal answer.
    pub user_answer: BTreeSet<usize>,
    /// `None` means ungraded.
    pub grade: Option<Tier>,
    /// Narrative feedback paired with `grade`; generated prose, stored opaquely.
    pub feedback: String,
    /// Whether the patient asked to explore another topic.
    pub continue_session: bool,
    /// Accumulating conversational log; survives `reset`.
    pub transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field back to its initial value, keeping the transcript.
    /// Called by the loop controller before re-entering the graph.
    pub fn reset(&mut self) {
        self.topic.clear();
        self.reference_material.clear();
        self.summary.clear();
        self.quiz = None;
        self.user_answer.clear();
        self.grade = None;
        self.feedback.clear();
        self.continue_session = false;
    }
}
