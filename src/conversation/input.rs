/*!
 * Inbound event shapes and input classification.
 *
 * All input-shape regexes live here. Raw event content is mapped to a small
 * tagged `ClassifiedInput` category; the state machine consumes categories
 * only and never touches raw text patterns.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::session::models::Level;

/// Exactly three "digit + letter a-d" pairs separated by comma and optional space
static ANSWER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d[a-d],\s*\d[a-d],\s*\d[a-d]$").expect("valid answer-line regex")
});

/// One answer button payload: `ans:<digit><letter>`
static ANSWER_BUTTON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ans:(\d)([a-d])$").expect("valid answer-button regex")
});

/// One level button payload: `level:<name>`
static LEVEL_BUTTON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^level:(\w+)$").expect("valid level-button regex"));

/// An event delivered to the conversation core
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Stable user identifier
    pub user_id: i64,
    /// Raw event content
    pub payload: Payload,
}

/// Raw content of an inbound event
#[derive(Debug, Clone)]
pub enum Payload {
    /// Free-form message text
    Text(String),
    /// Inline-button callback data
    Button(String),
}

/// Input category consumed by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedInput {
    /// Restart command (`/start`, `/restart`)
    Restart,
    /// A proficiency level, from the menu or typed verbatim
    LevelChoice(Level),
    /// A complete answer line such as `"1c, 2b, 3a"`
    AnswerLine(String),
    /// One answer button press
    AnswerButton {
        /// Question index as pressed (validated against range by the session)
        question: u8,
        /// Option letter a-d
        option: char,
    },
    /// Any other non-empty free text
    Text(String),
    /// Empty or whitespace-only text
    Empty,
    /// Content that matches no known shape (unknown commands, stray callbacks)
    Unrecognized,
}

/// Classify raw event content into an input category.
///
/// Classification is state-independent; the machine decides what each
/// category means in the current conversation phase.
pub fn classify(payload: &Payload) -> ClassifiedInput {
    match payload {
        Payload::Text(text) => classify_text(text),
        Payload::Button(data) => classify_button(data),
    }
}

fn classify_text(text: &str) -> ClassifiedInput {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return ClassifiedInput::Empty;
    }

    if let Some(command) = trimmed.strip_prefix('/') {
        return match command.split_whitespace().next().unwrap_or("") {
            "start" | "restart" => ClassifiedInput::Restart,
            _ => ClassifiedInput::Unrecognized,
        };
    }

    if let Ok(level) = Level::from_str(trimmed) {
        return ClassifiedInput::LevelChoice(level);
    }

    if ANSWER_LINE.is_match(trimmed) {
        return ClassifiedInput::AnswerLine(trimmed.to_string());
    }

    ClassifiedInput::Text(trimmed.to_string())
}

fn classify_button(data: &str) -> ClassifiedInput {
    if let Some(captures) = ANSWER_BUTTON.captures(data) {
        let question = captures[1].parse::<u8>().unwrap_or(0);
        let option = captures[2].chars().next().unwrap_or('a');
        return ClassifiedInput::AnswerButton { question, option };
    }

    if let Some(captures) = LEVEL_BUTTON.captures(data) {
        if let Ok(level) = Level::from_str(&captures[1]) {
            return ClassifiedInput::LevelChoice(level);
        }
    }

    ClassifiedInput::Unrecognized
}
