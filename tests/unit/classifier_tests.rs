/*!
 * Tests for inbound input classification
 */

use tutorbot::conversation::input::{ClassifiedInput, Payload, classify};
use tutorbot::session::models::Level;

fn text(s: &str) -> Payload {
    Payload::Text(s.to_string())
}

fn button(s: &str) -> Payload {
    Payload::Button(s.to_string())
}

/// The exact acceptance cases called out for the answer pattern
#[test]
fn test_classify_withAnswerShapes_shouldMatchAcceptancePolicy() {
    // Accepted: exactly three digit+letter pairs, letters a-d
    assert!(matches!(classify(&text("1c, 2b, 3a")), ClassifiedInput::AnswerLine(_)));

    // Rejected: only two pairs
    assert!(matches!(classify(&text("1c,2b")), ClassifiedInput::Text(_)));

    // Rejected: invalid letter
    assert!(matches!(classify(&text("1x, 2b, 3a")), ClassifiedInput::Text(_)));
}

#[test]
fn test_classify_withLevelWords_shouldAcceptAnyCase() {
    assert_eq!(classify(&text("beginner")), ClassifiedInput::LevelChoice(Level::Beginner));
    assert_eq!(classify(&text("Intermediate")), ClassifiedInput::LevelChoice(Level::Intermediate));
    assert_eq!(classify(&text("ADVANCED")), ClassifiedInput::LevelChoice(Level::Advanced));
}

#[test]
fn test_classify_withCommands_shouldOnlyRecognizeRestart() {
    assert_eq!(classify(&text("/start")), ClassifiedInput::Restart);
    assert_eq!(classify(&text("/restart")), ClassifiedInput::Restart);
    assert_eq!(classify(&text("/start now")), ClassifiedInput::Restart);
    assert_eq!(classify(&text("/settings")), ClassifiedInput::Unrecognized);
}

#[test]
fn test_classify_withButtonPayloads_shouldTagMenuAndAnswers() {
    assert_eq!(
        classify(&button("level:advanced")),
        ClassifiedInput::LevelChoice(Level::Advanced)
    );
    assert_eq!(
        classify(&button("ans:2c")),
        ClassifiedInput::AnswerButton { question: 2, option: 'c' }
    );
    assert_eq!(classify(&button("garbage")), ClassifiedInput::Unrecognized);
    assert_eq!(classify(&button("ans:22c")), ClassifiedInput::Unrecognized);
}

#[test]
fn test_classify_withWhitespaceOnly_shouldBeEmpty() {
    assert_eq!(classify(&text("\t  \n")), ClassifiedInput::Empty);
}

#[test]
fn test_classify_withTopicText_shouldTrimAndKeep() {
    assert_eq!(
        classify(&text("  Present Perfect  ")),
        ClassifiedInput::Text("Present Perfect".to_string())
    );
}
