//! Fixed instruction templates for the three text-generation calls and the
//! search query suffix. These are part of the engine contract; surfaces do
//! not override them.

use crate::grading::Tier;
use crate::session::QuizItem;
use std::collections::BTreeSet;

/// Appended to the patient's topic when building the search query, to steer
/// retrieval toward medical explainer content.
pub const SEARCH_QUERY_SUFFIX: &str = "health information medical explanation";

/// Seed role description for the conversational transcript.
pub const ASSISTANT_ROLE: &str = "You are a helpful healthcare assistant that provides \
accurate, patient-friendly information about health topics.";

pub const SUMMARIZER_INSTRUCTIONS: &str = "\
You are a healthcare educator who specializes in explaining medical concepts in simple, \
patient-friendly language.
Summarize the provided information into 3-4 paragraphs that are easy to understand.
Focus on key facts, symptoms, treatments, and preventive measures if applicable.
Use simple language and avoid medical jargon when possible.
If you need to use medical terms, provide a brief explanation.
If no reference material is provided, write a brief general overview of the topic instead.";

pub const QUIZ_INSTRUCTIONS: &str = "\
You are a healthcare educator creating a comprehension check.
Create ONE multiple-choice question based ONLY on the information in the provided summary.
The question must test understanding of a key concept from the summary, and every correct \
answer must be found directly in the summary text.
Respond with a single JSON object and nothing else, using exactly these keys:
{\"question\": string, \"options\": [string, ...], \"correct_answers\": [int, ...], \
\"explanation\": string}
Provide four unique options. \"correct_answers\" holds the 0-based indices of ALL correct \
options; include at least two correct options. Do not reveal the answer in the question.";

pub const FEEDBACK_INSTRUCTIONS: &str = "\
You are a healthcare educator evaluating a patient's understanding.
The answer has already been graded; do not change or restate the grade as a different one.
Write short narrative feedback that explains the result, citing the original summary \
directly to reinforce learning.
Be encouraging and supportive, even if the answer was not fully correct.";

/// User content for the summarization call.
pub fn summarize_request(topic: &str, material: &str) -> String {
    format!(
        "Please summarize the following information about {topic} in patient-friendly \
         language:\n\n{material}"
    )
}

/// User content for the quiz-authoring call.
pub fn quiz_request(topic: &str, summary: &str) -> String {
    format!("Please create one quiz question about {topic} based on this summary:\n\n{summary}")
}

/// User content for the feedback-authoring call. The grade itself comes from
/// the grading engine; the generator only narrates it.
pub fn feedback_request(
    quiz: &QuizItem,
    selected: &BTreeSet<usize>,
    correct_texts: &[&str],
    tier: Tier,
    summary: &str,
) -> String {
    let selected_texts: Vec<&str> = selected
        .iter()
        .filter_map(|&idx| quiz.options.get(idx).map(String::as_str))
        .collect();
    let selected_line = if selected_texts.is_empty() {
        "(nothing selected)".to_string()
    } else {
        selected_texts.join(", ")
    };

    format!(
        "Quiz question: {question}\n\
         Patient selected: {selected_line}\n\
         Correct answers: {correct}\n\
         Grading result: {grade}\n\n\
         Original summary:\n{summary}\n\n\
         Please write feedback for this result with citations from the summary.",
        question = quiz.question,
        correct = correct_texts.join(", "),
        grade = tier.describe(),
    )
}

/// Flatten retrieved reference material into the text block the summarizer
/// consumes. Empty material yields an empty block; summarization still runs.
pub fn material_block(results: &[crate::capabilities::SearchResult]) -> String {
    let mut block = String::new();
    for result in results {
        block.push_str(&format!(
            "Title: {}\nContent: {}\n\n",
            result.title, result.content
        ));
    }
    block
}
