//! Parsing and validation of generated quiz items.
//!
//! The quiz-authoring call returns free text that must contain a single JSON
//! object. Models occasionally wrap it in code fences or prose, so parsing
//! slices the outermost object before deserializing. Failures here are
//! recoverable; the generate-quiz state retries up to its bound.

use crate::session::QuizItem;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("no JSON object found in generated output")]
    NoJsonObject,
    #[error("malformed quiz JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("quiz question is empty")]
    EmptyQuestion,
    #[error("quiz has no options")]
    NoOptions,
    #[error("quiz option {0} appears more than once")]
    DuplicateOption(String),
    #[error("quiz has no correct answers")]
    NoCorrectAnswers,
    #[error("correct answer index {index} is out of range for {option_count} options")]
    IndexOutOfRange { index: usize, option_count: usize },
}

/// Parse a generated quiz, tolerating fences and surrounding prose.
pub fn parse_quiz(raw: &str) -> Result<QuizItem, QuizParseError> {
    let start = raw.find('{').ok_or(QuizParseError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(QuizParseError::NoJsonObject)?;
    if end < start {
        return Err(QuizParseError::NoJsonObject);
    }

    let quiz: QuizItem = serde_json::from_str(&raw[start..=end])?;
    validate(&quiz)?;
    Ok(quiz)
}

fn validate(quiz: &QuizItem) -> Result<(), QuizParseError> {
    if quiz.question.trim().is_empty() {
        return Err(QuizParseError::EmptyQuestion);
    }
    if quiz.options.is_empty() {
        return Err(QuizParseError::NoOptions);
    }

    let mut seen = HashSet::new();
    for option in &quiz.options {
        if !seen.insert(option.as_str()) {
            return Err(QuizParseError::DuplicateOption(option.clone()));
        }
    }

    if quiz.correct_answers.is_empty() {
        return Err(QuizParseError::NoCorrectAnswers);
    }
    for &index in &quiz.correct_answers {
        if index >= quiz.options.len() {
            return Err(QuizParseError::IndexOutOfRange {
                index,
                option_count: quiz.options.len(),
            });
        }
    }

    Ok(())
}
