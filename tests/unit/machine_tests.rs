/*!
 * Tests for the conversation state machine transition table
 */

use tutorbot::conversation::input::ClassifiedInput;
use tutorbot::conversation::machine::{ConversationState, Rejection, Step, advance};
use tutorbot::session::models::{Level, Session};

fn session_in(state: ConversationState) -> Session {
    let mut session = Session::new(1);
    session.state = state;
    if state != ConversationState::AwaitingLevel {
        session.level = Some(Level::Beginner);
    }
    session
}

fn all_states() -> [ConversationState; 3] {
    [
        ConversationState::AwaitingLevel,
        ConversationState::AwaitingTopic,
        ConversationState::AwaitingAnswers,
    ]
}

fn representative_inputs() -> Vec<ClassifiedInput> {
    vec![
        ClassifiedInput::Restart,
        ClassifiedInput::LevelChoice(Level::Intermediate),
        ClassifiedInput::AnswerLine("1a, 2b, 3c".to_string()),
        ClassifiedInput::AnswerButton { question: 1, option: 'a' },
        ClassifiedInput::Text("Past Simple".to_string()),
        ClassifiedInput::Empty,
        ClassifiedInput::Unrecognized,
    ]
}

/// Every (state, category) pair must produce a deterministic step
#[test]
fn test_advance_withEveryStateAndCategory_shouldBeTotalAndDeterministic() {
    for state in all_states() {
        let session = session_in(state);
        for input in representative_inputs() {
            let first = advance(&session, &input);
            let second = advance(&session, &input);
            assert_eq!(first, second, "non-deterministic step for {:?}/{:?}", state, input);
        }
    }
}

/// The table rows from the conversation design, spelled out
#[test]
fn test_advance_withTableRows_shouldMatchExpectedSteps() {
    // AwaitingLevel
    let awaiting_level = session_in(ConversationState::AwaitingLevel);
    assert_eq!(
        advance(&awaiting_level, &ClassifiedInput::LevelChoice(Level::Advanced)),
        Step::SetLevel(Level::Advanced)
    );
    assert_eq!(
        advance(&awaiting_level, &ClassifiedInput::Text("hello".to_string())),
        Step::Reject(Rejection::ChooseLevelViaMenu)
    );

    // AwaitingTopic
    let awaiting_topic = session_in(ConversationState::AwaitingTopic);
    assert_eq!(
        advance(&awaiting_topic, &ClassifiedInput::Text("Conditionals".to_string())),
        Step::RequestExercise { topic: "Conditionals".to_string() }
    );
    assert_eq!(
        advance(&awaiting_topic, &ClassifiedInput::Empty),
        Step::Reject(Rejection::TopicExpected)
    );

    // AwaitingAnswers
    let awaiting_answers = session_in(ConversationState::AwaitingAnswers);
    assert_eq!(
        advance(&awaiting_answers, &ClassifiedInput::AnswerLine("1c, 2b, 3a".to_string())),
        Step::SubmitAnswers { answers: "1c, 2b, 3a".to_string() }
    );
    assert_eq!(
        advance(&awaiting_answers, &ClassifiedInput::AnswerButton { question: 3, option: 'd' }),
        Step::RecordAnswer { question: 3, option: 'd' }
    );
    assert_eq!(
        advance(&awaiting_answers, &ClassifiedInput::Text("1c 2b 3a".to_string())),
        Step::Reject(Rejection::AnswerFormat)
    );
}

/// Restart must reset from every state
#[test]
fn test_advance_withRestart_shouldResetFromEveryState() {
    for state in all_states() {
        let session = session_in(state);
        assert_eq!(advance(&session, &ClassifiedInput::Restart), Step::Restart);
    }
}
