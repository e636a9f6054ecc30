//! The session state machine engine and loop controller.
//!
//! The conversation graph is fixed and known at design time: twelve named
//! states with a single unconditional edge each, except for [`StateId::Route`],
//! which consults `continue_session` to either re-enter the graph with a
//! reset session or terminate. Handlers read and write the [`Session`] and
//! reach the outside world only through the capability traits, so both the
//! CLI and the web surface drive identical semantics.

use crate::capabilities::{PromptError, SearchProvider, TextGenerator, UserInterface};
use crate::grading;
use crate::prompts;
use crate::quiz;
use crate::session::{Session, Speaker};
use anyhow::anyhow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How many times quiz generation is retried on unparseable output before
/// the session fails.
pub const DEFAULT_MAX_QUIZ_ATTEMPTS: usize = 3;

/// The named states of the conversation graph, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    CollectTopic,
    RetrieveMaterial,
    Summarize,
    PresentSummary,
    ConfirmReadiness,
    GenerateQuiz,
    PresentQuiz,
    CollectAnswer,
    GradeAnswer,
    PresentFeedback,
    ConfirmContinuation,
    Route,
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateId::CollectTopic => "collect_topic",
            StateId::RetrieveMaterial => "retrieve_material",
            StateId::Summarize => "summarize",
            StateId::PresentSummary => "present_summary",
            StateId::ConfirmReadiness => "confirm_readiness",
            StateId::GenerateQuiz => "generate_quiz",
            StateId::PresentQuiz => "present_quiz",
            StateId::CollectAnswer => "collect_answer",
            StateId::GradeAnswer => "grade_answer",
            StateId::PresentFeedback => "present_feedback",
            StateId::ConfirmContinuation => "confirm_continuation",
            StateId::Route => "route",
        };
        f.write_str(name)
    }
}

/// The static edge table. Every state has exactly one unconditional
/// successor except `Route`, whose outcome depends on the session and is
/// decided by the engine. The graph is acyclic apart from the single
/// routing edge back to `CollectTopic`.
pub fn successor(state: StateId) -> Option<StateId> {
    use StateId::*;
    match state {
        CollectTopic => Some(RetrieveMaterial),
        RetrieveMaterial => Some(Summarize),
        Summarize => Some(PresentSummary),
        PresentSummary => Some(ConfirmReadiness),
        ConfirmReadiness => Some(GenerateQuiz),
        GenerateQuiz => Some(PresentQuiz),
        PresentQuiz => Some(CollectAnswer),
        CollectAnswer => Some(GradeAnswer),
        GradeAnswer => Some(PresentFeedback),
        PresentFeedback => Some(ConfirmContinuation),
        ConfirmContinuation => Some(Route),
        Route => None,
    }
}

/// How a session run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The patient declined another topic; the graph reached its terminal.
    Completed,
    /// The patient interrupted or disconnected at a suspension point.
    Interrupted,
}

/// Fatal failures surfaced past the engine boundary. The engine never
/// continues with a corrupted session; it stops and names the failing state.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("session interrupted by user")]
    Interrupted,
    #[error("quiz generation produced unusable output after {attempts} attempts")]
    QuizGeneration { attempts: usize },
    #[error("state {state} failed: {cause}")]
    State {
        state: StateId,
        cause: anyhow::Error,
    },
}

/// Handler-level failures, mapped onto [`EngineError`] by `step`, which
/// knows the state being executed.
enum StepError {
    Interrupted,
    QuizGeneration { attempts: usize },
    Failed(anyhow::Error),
}

impl From<PromptError> for StepError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => StepError::Interrupted,
            PromptError::Io(io) => StepError::Failed(io.into()),
        }
    }
}

fn affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "yes" | "y" | "sure" | "ok" | "okay"
    )
}

/// Drives one patient-education session through the conversation graph.
///
/// The engine owns its [`Session`] exclusively for the whole run; after a
/// routing loop the cleared session is a fresh traversal, never aliased
/// with the prior one. Capability handles are injected by the process entry
/// point.
pub struct SessionEngine {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn TextGenerator>,
    ui: Arc<dyn UserInterface>,
    session: Session,
    max_quiz_attempts: usize,
}

impl SessionEngine {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
        ui: Arc<dyn UserInterface>,
    ) -> Self {
        Self {
            search,
            generator,
            ui,
            session: Session::new(),
            max_quiz_attempts: DEFAULT_MAX_QUIZ_ATTEMPTS,
        }
    }

    pub fn with_max_quiz_attempts(mut self, attempts: usize) -> Self {
        self.max_quiz_attempts = attempts.max(1);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the graph from the entry state until the routing state chooses
    /// termination or the patient interrupts.
    pub async fn run(&mut self) -> Result<SessionOutcome, EngineError> {
        let mut current = StateId::CollectTopic;
        loop {
            match self.step(current).await {
                Ok(Some(next)) => current = next,
                Ok(None) => {
                    info!("session complete");
                    return Ok(SessionOutcome::Completed);
                }
                Err(EngineError::Interrupted) => {
                    info!(state = %current, "session interrupted");
                    return Ok(SessionOutcome::Interrupted);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute one state handler and return the next state, or `None` when
    /// the routing state chose termination.
    pub async fn step(&mut self, state: StateId) -> Result<Option<StateId>, EngineError> {
        debug!(state = %state, "entering state");

        if state == StateId::Route {
            return Ok(self.route().await);
        }

        let result = match state {
            StateId::CollectTopic => self.collect_topic().await,
            StateId::RetrieveMaterial => self.retrieve_material().await,
            StateId::Summarize => self.summarize().await,
            StateId::PresentSummary => self.present_summary().await,
            StateId::ConfirmReadiness => self.confirm_readiness().await,
            StateId::GenerateQuiz => self.generate_quiz().await,
            StateId::PresentQuiz => self.present_quiz().await,
            StateId::CollectAnswer => self.collect_answer().await,
            StateId::GradeAnswer => self.grade_answer().await,
            StateId::PresentFeedback => self.present_feedback().await,
            StateId::ConfirmContinuation => self.confirm_continuation().await,
            StateId::Route => unreachable!("handled above"),
        };

        match result {
            Ok(()) => Ok(successor(state)),
            Err(StepError::Interrupted) => Err(EngineError::Interrupted),
            Err(StepError::QuizGeneration { attempts }) => {
                Err(EngineError::QuizGeneration { attempts })
            }
            Err(StepError::Failed(cause)) => Err(EngineError::State { state, cause }),
        }
    }

    async fn collect_topic(&mut self) -> Result<(), StepError> {
        self.ui
            .display("Welcome to HealthBot! I'm here to help you learn about health topics.")
            .await;

        let topic = loop {
            let raw = self
                .ui
                .prompt("What health topic or medical condition would you like to learn about? ")
                .await?;
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                break trimmed.to_string();
            }
            self.ui.display("Please enter a topic to continue.").await;
        };

        if self.session.transcript.is_empty() {
            self.session
                .transcript
                .push(Speaker::System, prompts::ASSISTANT_ROLE);
        }
        self.session
            .transcript
            .push(Speaker::User, format!("I want to learn about {topic}"));
        self.session.topic = topic;
        Ok(())
    }

    async fn retrieve_material(&mut self) -> Result<(), StepError> {
        let query = format!("{} {}", self.session.topic, prompts::SEARCH_QUERY_SUFFIX);
        self.ui
            .display(&format!(
                "Searching for information about {}...",
                self.session.topic
            ))
            .await;

        let results = self.search.search(&query).await.map_err(StepError::Failed)?;
        info!(hits = results.len(), "retrieved reference material");
        self.session.reference_material = results;
        Ok(())
    }

    async fn summarize(&mut self) -> Result<(), StepError> {
        // Zero search hits still summarize; quality degrades, the graph
        // does not branch.
        let material = prompts::material_block(&self.session.reference_material);
        let request = prompts::summarize_request(&self.session.topic, &material);

        let summary = self
            .generator
            .generate(prompts::SUMMARIZER_INSTRUCTIONS, &request)
            .await
            .map_err(StepError::Failed)?;

        self.session
            .transcript
            .push(Speaker::Assistant, summary.clone());
        self.session.summary = summary;
        Ok(())
    }

    async fn present_summary(&mut self) -> Result<(), StepError> {
        self.ui.display("\n=== HEALTH INFORMATION SUMMARY ===\n").await;
        self.ui.display(&self.session.summary).await;
        self.ui.display("\n===================================\n").await;
        Ok(())
    }

    async fn confirm_readiness(&mut self) -> Result<(), StepError> {
        let ready = self
            .ui
            .prompt("Are you ready for a quick comprehension check? (yes/no): ")
            .await?;

        // The confirmation is informational only: one extra pause at most,
        // then the session advances regardless of the answer.
        if !affirmative(&ready) {
            self.ui
                .display("Take your time. Let me know when you're ready.")
                .await;
            self.ui
                .prompt("Press Enter when you're ready to continue: ")
                .await?;
        }
        Ok(())
    }

    async fn generate_quiz(&mut self) -> Result<(), StepError> {
        let request = prompts::quiz_request(&self.session.topic, &self.session.summary);

        for attempt in 1..=self.max_quiz_attempts {
            let raw = self
                .generator
                .generate(prompts::QUIZ_INSTRUCTIONS, &request)
                .await
                .map_err(StepError::Failed)?;

            match quiz::parse_quiz(&raw) {
                Ok(item) => {
                    info!(attempt, options = item.options.len(), "quiz generated");
                    self.session.quiz = Some(item);
                    // A fresh quiz instance invalidates any prior answer
                    // and grade.
                    self.session.user_answer.clear();
                    self.session.grade = None;
                    self.session.feedback.clear();
                    return Ok(());
                }
                Err(err) => {
                    warn!(attempt, max = self.max_quiz_attempts, error = %err, "quiz output unparseable");
                }
            }
        }

        Err(StepError::QuizGeneration {
            attempts: self.max_quiz_attempts,
        })
    }

    async fn present_quiz(&mut self) -> Result<(), StepError> {
        let question = self
            .session
            .quiz
            .as_ref()
            .map(|q| q.question.clone())
            .ok_or_else(|| StepError::Failed(anyhow!("no quiz to present")))?;

        self.ui.display("\n=== COMPREHENSION CHECK ===\n").await;
        self.ui.display(&question).await;
        Ok(())
    }

    async fn collect_answer(&mut self) -> Result<(), StepError> {
        let options = self
            .session
            .quiz
            .as_ref()
            .map(|q| q.options.clone())
            .ok_or_else(|| StepError::Failed(anyhow!("no quiz to answer")))?;

        let selection = loop {
            let selected = self
                .ui
                .prompt_multi_select("Select every answer that applies.", &options)
                .await?;
            if selected.iter().all(|&index| index < options.len()) {
                break selected;
            }
            self.ui
                .display("That selection includes an option that is not listed. Please try again.")
                .await;
        };

        self.session.user_answer = selection;
        Ok(())
    }

    async fn grade_answer(&mut self) -> Result<(), StepError> {
        let (tier, request) = {
            let quiz = self
                .session
                .quiz
                .as_ref()
                .ok_or_else(|| StepError::Failed(anyhow!("no quiz to grade")))?;
            let tier = grading::grade(&self.session.user_answer, &quiz.correct_answers);
            let correct_texts = grading::correct_option_texts(quiz);
            let request = prompts::feedback_request(
                quiz,
                &self.session.user_answer,
                &correct_texts,
                tier,
                &self.session.summary,
            );
            (tier, request)
        };

        let feedback = self
            .generator
            .generate(prompts::FEEDBACK_INSTRUCTIONS, &request)
            .await
            .map_err(StepError::Failed)?;

        info!(tier = %tier, "answer graded");
        self.session.grade = Some(tier);
        self.session
            .transcript
            .push(Speaker::Assistant, feedback.clone());
        self.session.feedback = feedback;
        Ok(())
    }

    async fn present_feedback(&mut self) -> Result<(), StepError> {
        let tier = self
            .session
            .grade
            .ok_or_else(|| StepError::Failed(anyhow!("no grade to present")))?;

        self.ui.display("\n=== FEEDBACK ===\n").await;
        self.ui
            .display(&format!("Result: {}", tier.describe()))
            .await;
        self.ui.display(&self.session.feedback).await;
        self.ui.display("\n================\n").await;
        Ok(())
    }

    async fn confirm_continuation(&mut self) -> Result<(), StepError> {
        let answer = self
            .ui
            .prompt("Would you like to learn about another health topic? (yes/no): ")
            .await?;
        self.session.continue_session = affirmative(&answer);
        Ok(())
    }

    /// The loop controller: the only conditional edge in the graph.
    async fn route(&mut self) -> Option<StateId> {
        if self.session.continue_session {
            self.ui.display("Let's explore a new health topic!").await;
            self.session.reset();
            Some(StateId::CollectTopic)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{MockSearchProvider, SearchResult, UserInterface};
    use crate::grading::Tier;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::{BTreeSet, VecDeque};
    use std::sync::Mutex;

    const QUIZ_JSON: &str = r#"{
        "question": "Which of the following are symptoms?",
        "options": ["Fever", "Cough", "Headache", "Fatigue"],
        "correct_answers": [0, 1],
        "explanation": "Fever and cough are the symptoms named in the summary."
    }"#;

    /// A surface scripted with queued answers. An exhausted queue behaves
    /// like a disconnect, returning `Interrupted`.
    struct ScriptedUi {
        prompts: Mutex<VecDeque<String>>,
        selections: Mutex<VecDeque<BTreeSet<usize>>>,
        displayed: Mutex<Vec<String>>,
    }

    impl ScriptedUi {
        fn new(prompts: &[&str], selections: Vec<BTreeSet<usize>>) -> Self {
            Self {
                prompts: Mutex::new(prompts.iter().map(|s| s.to_string()).collect()),
                selections: Mutex::new(selections.into_iter().collect()),
                displayed: Mutex::new(Vec::new()),
            }
        }

        fn displayed(&self) -> Vec<String> {
            self.displayed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserInterface for ScriptedUi {
        async fn prompt(&self, _description: &str) -> Result<String, PromptError> {
            self.prompts
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(PromptError::Interrupted)
        }

        async fn prompt_multi_select(
            &self,
            _description: &str,
            _options: &[String],
        ) -> Result<BTreeSet<usize>, PromptError> {
            self.selections
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(PromptError::Interrupted)
        }

        async fn display(&self, text: &str) {
            self.displayed.lock().unwrap().push(text.to_string());
        }
    }

    struct ScriptedGenerator {
        responses: Mutex<VecDeque<String>>,
    }

    impl ScriptedGenerator {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl crate::capabilities::TextGenerator for ScriptedGenerator {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow!("generator script exhausted"))
        }
    }

    fn stub_search(results: Vec<SearchResult>) -> Arc<MockSearchProvider> {
        let mut search = MockSearchProvider::new();
        search.expect_search().returning(move |_| Ok(results.clone()));
        Arc::new(search)
    }

    fn one_hit() -> Vec<SearchResult> {
        vec![SearchResult {
            title: "Overview".to_string(),
            content: "Reference content.".to_string(),
        }]
    }

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn traversal_visits_every_state_once_and_ends_at_route() {
        let mut seen = Vec::new();
        let mut state = StateId::CollectTopic;
        loop {
            seen.push(state);
            match successor(state) {
                Some(next) => state = next,
                None => break,
            }
        }

        assert_eq!(seen.len(), 12, "every state appears on the path");
        assert_eq!(*seen.last().unwrap(), StateId::Route);
        let unique: std::collections::HashSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len(), "the path is acyclic");
    }

    #[tokio::test]
    async fn full_traversal_grades_exact_and_terminates() {
        let ui = Arc::new(ScriptedUi::new(&["diabetes", "yes", "no"], vec![set(&[0, 1])]));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "A friendly summary of diabetes.",
            QUIZ_JSON,
            "Great job! As the summary says, fever and cough are key symptoms.",
        ]));

        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .withf(|query| {
                query.starts_with("diabetes")
                    && query.ends_with("health information medical explanation")
            })
            .returning(|_| {
                Ok(vec![SearchResult {
                    title: "Overview".to_string(),
                    content: "Reference content.".to_string(),
                }])
            });

        let mut engine = SessionEngine::new(Arc::new(search), generator, ui.clone());
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(engine.session().topic, "diabetes");
        assert_eq!(engine.session().grade, Some(Tier::Exact));
        assert_eq!(
            engine.session().feedback,
            "Great job! As the summary says, fever and cough are key symptoms."
        );
        assert!(!engine.session().continue_session);
        assert!(
            ui.displayed()
                .iter()
                .any(|line| line.contains("A friendly summary of diabetes."))
        );
    }

    #[tokio::test]
    async fn looping_resets_session_but_transcript_accumulates() {
        let ui = Arc::new(ScriptedUi::new(
            &["heart disease", "yes", "yes", "asthma", "yes", "no"],
            vec![set(&[0]), set(&[2, 3])],
        ));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Summary one.",
            QUIZ_JSON,
            "Feedback one.",
            "Summary two.",
            QUIZ_JSON,
            "Feedback two.",
        ]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        // Second traversal owns a fresh session.
        assert_eq!(engine.session().topic, "asthma");
        assert_eq!(engine.session().summary, "Summary two.");
        assert_eq!(engine.session().grade, Some(Tier::None));
        // One system seed, then (user, summary, feedback) per traversal.
        assert_eq!(engine.session().transcript.len(), 7);
    }

    #[tokio::test]
    async fn empty_topic_and_out_of_range_answers_are_reprompted() {
        let ui = Arc::new(ScriptedUi::new(
            &["   ", "flu", "yes", "no"],
            vec![set(&[9]), set(&[0])],
        ));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Flu summary.",
            QUIZ_JSON,
            "Feedback.",
        ]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui.clone());
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(engine.session().topic, "flu");
        assert_eq!(engine.session().user_answer, set(&[0]));
        assert_eq!(engine.session().grade, Some(Tier::PartialSubset));
        assert!(
            ui.displayed()
                .iter()
                .any(|line| line.contains("not listed"))
        );
    }

    #[tokio::test]
    async fn declined_readiness_pauses_once_then_advances() {
        // "no" to readiness consumes one extra prompt, then the quiz runs
        // regardless.
        let ui = Arc::new(ScriptedUi::new(&["flu", "no", "", "no"], vec![set(&[0, 1])]));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Flu summary.",
            QUIZ_JSON,
            "Feedback.",
        ]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(engine.session().grade, Some(Tier::Exact));
    }

    #[tokio::test]
    async fn zero_search_results_still_produce_a_summary() {
        let ui = Arc::new(ScriptedUi::new(&["rare disease X", "yes", "no"], vec![set(&[0, 1])]));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "A generic overview of rare disease X.",
            QUIZ_JSON,
            "Feedback.",
        ]));

        let mut engine = SessionEngine::new(stub_search(Vec::new()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(engine.session().reference_material.is_empty());
        assert_eq!(engine.session().summary, "A generic overview of rare disease X.");
    }

    #[tokio::test]
    async fn quiz_generation_recovers_within_retry_bound() {
        let ui = Arc::new(ScriptedUi::new(&["flu", "yes", "no"], vec![set(&[0, 1])]));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Flu summary.",
            "Sorry, here is your quiz as prose.",
            "Still no JSON in sight.",
            QUIZ_JSON,
            "Feedback.",
        ]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(engine.session().quiz.is_some());
    }

    #[tokio::test]
    async fn quiz_generation_exhausting_bound_is_fatal() {
        let ui = Arc::new(ScriptedUi::new(&["flu", "yes"], vec![]));
        let generator = Arc::new(ScriptedGenerator::new(&[
            "Flu summary.",
            "Not JSON.",
            "Still not JSON.",
        ]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui)
            .with_max_quiz_attempts(2);
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, EngineError::QuizGeneration { attempts: 2 }));
    }

    #[tokio::test]
    async fn search_failure_is_fatal_and_names_the_state() {
        let ui = Arc::new(ScriptedUi::new(&["flu"], vec![]));
        let generator = Arc::new(ScriptedGenerator::new(&[]));

        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .returning(|_| Err(anyhow!("network unreachable")));

        let mut engine = SessionEngine::new(Arc::new(search), generator, ui);
        let err = engine.run().await.unwrap_err();

        match err {
            EngineError::State { state, cause } => {
                assert_eq!(state, StateId::RetrieveMaterial);
                assert!(cause.to_string().contains("network unreachable"));
            }
            other => panic!("expected State error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn interrupt_at_first_prompt_unwinds_cleanly() {
        let ui = Arc::new(ScriptedUi::new(&[], vec![]));
        let generator = Arc::new(ScriptedGenerator::new(&[]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Interrupted);
        // No partial writes from the interrupted handler.
        assert_eq!(engine.session().topic, "");
        assert!(engine.session().transcript.is_empty());
    }

    #[tokio::test]
    async fn interrupt_mid_session_leaves_completed_states_intact() {
        // Readiness prompt disconnects; topic, material, and summary from
        // the states that finished are preserved.
        let ui = Arc::new(ScriptedUi::new(&["flu"], vec![]));
        let generator = Arc::new(ScriptedGenerator::new(&["Flu summary."]));

        let mut engine = SessionEngine::new(stub_search(one_hit()), generator, ui);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Interrupted);
        assert_eq!(engine.session().topic, "flu");
        assert_eq!(engine.session().summary, "Flu summary.");
        assert!(engine.session().quiz.is_none());
    }
}
