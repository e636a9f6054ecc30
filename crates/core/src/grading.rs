//! Set-based answer grading.
//!
//! The authoritative grade is always computed here from the selected and
//! correct index sets. Generated feedback text is narrative only and is
//! never parsed to recover a grade.

use crate::session::QuizItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The four grading outcomes. For any pair of finite index sets exactly one
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Selected exactly the correct set (including both empty).
    Exact,
    /// A non-empty proper subset of the correct answers, nothing incorrect.
    PartialSubset,
    /// At least one correct and at least one incorrect selection.
    PartialOverlap,
    /// No correct selections at all.
    None,
}

impl Tier {
    /// Short human description used when composing feedback requests.
    pub fn describe(self) -> &'static str {
        match self {
            Tier::Exact => "fully correct",
            Tier::PartialSubset => "partially correct: some right answers were missed",
            Tier::PartialOverlap => "mixed: some right answers alongside some wrong ones",
            Tier::None => "incorrect: none of the right answers were selected",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Exact => "exact",
            Tier::PartialSubset => "partial_subset",
            Tier::PartialOverlap => "partial_overlap",
            Tier::None => "none",
        };
        f.write_str(name)
    }
}

/// Classify a selected answer set against the correct set.
///
/// Pure and total: the four branches partition every possible pair,
/// checked most-specific first so they are mutually exclusive.
pub fn grade(selected: &BTreeSet<usize>, correct: &BTreeSet<usize>) -> Tier {
    if selected == correct {
        Tier::Exact
    } else if !selected.is_disjoint(correct) && selected.is_subset(correct) {
        Tier::PartialSubset
    } else if !selected.is_disjoint(correct) {
        Tier::PartialOverlap
    } else {
        Tier::None
    }
}

/// The correct option texts in ascending index order, for inclusion in
/// feedback. Indices out of range are skipped rather than panicking; quiz
/// validation rejects them before a quiz is ever stored.
pub fn correct_option_texts(quiz: &QuizItem) -> Vec<&str> {
    quiz.correct_answers
        .iter()
        .filter_map(|&idx| quiz.options.get(idx).map(String::as_str))
        .collect()
}
