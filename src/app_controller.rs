use log::{debug, info, warn};
use std::sync::Arc;

use crate::conversation::input::{InboundEvent, classify};
use crate::conversation::machine::{ConversationState, Rejection, Step, advance};
use crate::conversation::replies::{self, Markup, Outgoing};
use crate::generation::{GENERATION_ERROR_TEXT, GenerationService};
use crate::prompts;
use crate::providers::mock::MockProvider;
use crate::response_cleaner::clean_exercise_text;
use crate::session::models::Session;
use crate::session::store::SessionStore;

// @module: Application controller for conversation handling

/// The only exercise type the canonical conversation requests
const EXERCISE_TYPE: &str = "multiple-choice";

/// Main application controller wiring the conversation core to its collaborators
pub struct Controller {
    /// Per-user session store
    store: Arc<SessionStore>,
    /// Generation service
    generation: GenerationService,
}

impl Controller {
    // @method: Create a new controller with the given generation service
    pub fn new(generation: GenerationService) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            generation,
        }
    }

    /// Create a controller backed by a mock provider, for tests
    pub fn new_for_test(provider: MockProvider) -> Self {
        Self::new(GenerationService::with_mock(provider))
    }

    /// Access the session store (idle purging, tests)
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    /// Handle one inbound event to completion and return the replies to send.
    ///
    /// The user's session mutex is held for the whole turn, including the
    /// generation round trip, so events from one user are processed strictly
    /// in arrival order while other users proceed concurrently.
    pub async fn handle_event(&self, event: InboundEvent) -> Vec<Outgoing> {
        let input = classify(&event.payload);
        debug!("User {}: classified input {:?}", event.user_id, input);

        let handle = self.store.get(event.user_id);
        let mut session = handle.lock().await;
        session.touch();

        let step = advance(&session, &input);
        debug!("User {}: state {:?}, step {:?}", event.user_id, session.state, step);

        match step {
            Step::Restart => {
                session.reset();
                vec![replies::greeting()]
            }
            Step::SetLevel(level) => {
                session.level = Some(level);
                session.state = ConversationState::AwaitingTopic;
                info!("User {}: level set to {}", session.user_id, level);
                vec![replies::topic_prompt(level)]
            }
            Step::RequestExercise { topic } => self.run_exercise_generation(&mut session, &topic).await,
            Step::RecordAnswer { question, option } => match session.record_answer(question, option) {
                Ok(()) if session.answers_complete() => {
                    let answers = session.combined_answers();
                    self.run_grading(&mut session, &answers).await
                }
                Ok(()) => {
                    debug!(
                        "User {}: answer {}{} recorded ({}/{})",
                        session.user_id,
                        question,
                        option,
                        session.answered_count(),
                        prompts::QUESTION_COUNT
                    );
                    Vec::new()
                }
                Err(e) => {
                    warn!("User {}: rejected button answer: {}", session.user_id, e);
                    vec![replies::rejection(Rejection::AnswerFormat)]
                }
            },
            Step::SubmitAnswers { answers } => self.run_grading(&mut session, &answers).await,
            Step::Reject(reason) => vec![replies::rejection(reason)],
        }
    }

    /// Generate an exercise for the topic and advance to answer collection.
    async fn run_exercise_generation(&self, session: &mut Session, topic: &str) -> Vec<Outgoing> {
        let Some(level) = session.level else {
            // Unreachable through normal transitions; recover by restarting.
            warn!("User {}: topic phase without a level, restarting", session.user_id);
            session.reset();
            return vec![replies::greeting()];
        };

        info!("User {}: generating exercise on '{}' ({})", session.user_id, topic, level);

        let prompt = prompts::exercise_prompt(level.as_str(), topic, EXERCISE_TYPE);
        let raw = self.generation.generate(&prompt).await;
        let cleaned = clean_exercise_text(&raw);
        // A failed generation arrives as the sentinel text and the
        // conversation advances anyway, matching the historical behavior.
        let exercise = if cleaned.is_empty() {
            GENERATION_ERROR_TEXT.to_string()
        } else {
            cleaned
        };

        session.begin_exercise(exercise.clone());
        session.state = ConversationState::AwaitingAnswers;

        vec![
            Outgoing::text(exercise),
            Outgoing::with_markup(replies::ANSWER_INSTRUCTIONS, Markup::AnswerGrid),
        ]
    }

    /// Grade a complete answer line and loop back to topic collection.
    async fn run_grading(&self, session: &mut Session, answers: &str) -> Vec<Outgoing> {
        let exercise = session.exercise_text.clone().unwrap_or_default();

        info!("User {}: grading answers '{}'", session.user_id, answers);

        let prompt = prompts::grading_prompt(&exercise, answers);
        let result = self.generation.generate(&prompt).await;

        session.clear_exercise();
        session.state = ConversationState::AwaitingTopic;

        vec![Outgoing::text(result), Outgoing::text(replies::NEXT_TOPIC)]
    }
}
