/*!
 * The conversation state machine.
 *
 * `advance` is the entire transition table: a pure function from the current
 * session and a classified input to the step the controller must execute.
 * Every (state, category) pair has a defined outcome, so a malformed or
 * out-of-phase input can never crash or wedge a conversation.
 */

use serde::{Deserialize, Serialize};

use crate::session::models::{Level, Session};
use super::input::ClassifiedInput;

/// Conversation phase, stored in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    /// Waiting for a level selection from the menu
    AwaitingLevel,
    /// Level recorded; waiting for a free-text grammar topic
    AwaitingTopic,
    /// Exercise delivered; waiting for answers (line or buttons)
    AwaitingAnswers,
}

/// Reason a transition was refused; maps to a canned corrective message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Input in `AwaitingLevel` that is not a level choice
    ChooseLevelViaMenu,
    /// Input in `AwaitingTopic` that cannot serve as a topic
    TopicExpected,
    /// Input in `AwaitingAnswers` that is neither an answer line nor a button
    AnswerFormat,
}

/// The action the controller must carry out for one event
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Reset the session and greet with the level menu
    Restart,
    /// Record the chosen level and ask for a topic
    SetLevel(Level),
    /// Generate an exercise for the given topic
    RequestExercise {
        /// The free-text grammar topic
        topic: String,
    },
    /// Merge one button answer into the pending set
    RecordAnswer {
        /// Question index as pressed
        question: u8,
        /// Option letter a-d
        option: char,
    },
    /// Grade a complete answer line
    SubmitAnswers {
        /// The combined answer line, e.g. `"1c, 2b, 3a"`
        answers: String,
    },
    /// Refuse the input with a canned message; state does not change
    Reject(Rejection),
}

/// Decide the step for the given session and classified input.
pub fn advance(session: &Session, input: &ClassifiedInput) -> Step {
    // Restart wins in every state
    if matches!(input, ClassifiedInput::Restart) {
        return Step::Restart;
    }

    match session.state {
        ConversationState::AwaitingLevel => match input {
            ClassifiedInput::LevelChoice(level) => Step::SetLevel(*level),
            _ => Step::Reject(Rejection::ChooseLevelViaMenu),
        },

        ConversationState::AwaitingTopic => match input {
            ClassifiedInput::Text(topic) => Step::RequestExercise { topic: topic.clone() },
            // An answer line is still non-empty free text here; the original
            // bot would have accepted it as a request, so we do too.
            ClassifiedInput::AnswerLine(line) => Step::RequestExercise { topic: line.clone() },
            _ => Step::Reject(Rejection::TopicExpected),
        },

        ConversationState::AwaitingAnswers => match input {
            ClassifiedInput::AnswerLine(answers) => Step::SubmitAnswers { answers: answers.clone() },
            ClassifiedInput::AnswerButton { question, option } => Step::RecordAnswer {
                question: *question,
                option: *option,
            },
            _ => Step::Reject(Rejection::AnswerFormat),
        },
    }
}
