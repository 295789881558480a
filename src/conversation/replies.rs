/*!
 * Canned outbound texts and markup descriptors.
 *
 * The core describes interactive affordances abstractly; only the delivery
 * layer knows how to render a `Markup` into actual inline keyboards.
 */

use crate::session::models::Level;
use super::machine::Rejection;

/// Greeting sent on first contact and on restart
pub const GREETING: &str = "👋 Hi! I'm your personal English tutor.\n\n\
    I'll generate a short multiple-choice exercise for you, then grade your answers.\n\n\
    Choose your level to get started:";

/// Rejection for non-level input while awaiting a level
pub const CHOOSE_LEVEL: &str = "❌ Please choose your level using the buttons below.";

/// Rejection for unusable input while awaiting a topic
pub const TOPIC_EXPECTED: &str = "❌ That doesn't look like a topic.\n\n\
    Send me a grammar topic, e.g. <code>Past Simple</code> or <code>Present Continuous</code>.";

/// Rejection for malformed input while awaiting answers
pub const ANSWER_FORMAT: &str = "❌ Wrong answer format.\n\n\
    Send your answers like <code>1c, 2b, 3a</code>, or tap the answer buttons.";

/// Instructions shown together with a freshly generated exercise
pub const ANSWER_INSTRUCTIONS: &str = "✏️ Send your answers like <code>1c, 2b, 3a</code> — \
    or tap one button per question below.";

/// Loop prompt after grading
pub const NEXT_TOPIC: &str = "🔄 Want another exercise?\n\nSend me a new grammar topic!";

/// Interactive affordance attached to an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// No keyboard
    None,
    /// Fixed menu of the three levels
    LevelMenu,
    /// Grid of answer-option buttons, one row per question
    AnswerGrid,
}

/// One outbound message produced by the core
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    /// Message body (HTML)
    pub text: String,
    /// Optional interactive affordance
    pub markup: Markup,
}

impl Outgoing {
    /// Plain text message without a keyboard
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::None,
        }
    }

    /// Message with an attached keyboard
    pub fn with_markup(text: impl Into<String>, markup: Markup) -> Self {
        Self {
            text: text.into(),
            markup,
        }
    }
}

/// The greeting plus level menu
pub fn greeting() -> Outgoing {
    Outgoing::with_markup(GREETING, Markup::LevelMenu)
}

/// Confirmation after a level choice, asking for a topic
pub fn topic_prompt(level: Level) -> Outgoing {
    Outgoing::text(format!(
        "✅ Level saved: <b>{}</b>\n\n\
         📚 Now send me a grammar topic, e.g. <code>Past Simple</code> or <code>Vocabulary</code>.",
        level
    ))
}

/// The canned corrective message for a rejection
pub fn rejection(reason: Rejection) -> Outgoing {
    match reason {
        Rejection::ChooseLevelViaMenu => Outgoing::with_markup(CHOOSE_LEVEL, Markup::LevelMenu),
        Rejection::TopicExpected => Outgoing::text(TOPIC_EXPECTED),
        Rejection::AnswerFormat => Outgoing::text(ANSWER_FORMAT),
    }
}
