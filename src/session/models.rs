/*!
 * Session data model.
 *
 * A `Session` is the only mutable state kept per user: the conversation
 * phase, the chosen proficiency level, the last generated exercise and any
 * answers collected so far through inline buttons.
 */

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::conversation::machine::ConversationState;
use crate::prompts::QUESTION_COUNT;

/// Proficiency level offered in the level menu
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels, in menu order
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Level name as shown to the user and interpolated into prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(anyhow!("Invalid level: {}", s)),
        }
    }
}

/// Per-user conversational state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier (Telegram chat id)
    pub user_id: i64,

    /// Current conversation phase
    pub state: ConversationState,

    /// Chosen proficiency level, unset until the level menu is used
    pub level: Option<Level>,

    /// Last generated exercise body
    pub exercise_text: Option<String>,

    /// Button answers collected so far: question index -> option letter
    pending_answers: BTreeMap<u8, char>,

    /// Timestamp of the last handled event, drives idle eviction
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session in the initial state
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            state: ConversationState::AwaitingLevel,
            level: None,
            exercise_text: None,
            pending_answers: BTreeMap::new(),
            last_activity: Utc::now(),
        }
    }

    /// Mark the session as active now
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Reset the session to the initial state, discarding all exercise data
    pub fn reset(&mut self) {
        self.state = ConversationState::AwaitingLevel;
        self.level = None;
        self.clear_exercise();
    }

    /// Store a freshly generated exercise, superseding any previous one
    pub fn begin_exercise(&mut self, exercise_text: String) {
        self.exercise_text = Some(exercise_text);
        self.pending_answers.clear();
    }

    /// Drop the current exercise and any partially collected answers
    pub fn clear_exercise(&mut self) {
        self.exercise_text = None;
        self.pending_answers.clear();
    }

    /// Record a single button answer.
    ///
    /// Question indices outside `1..=QUESTION_COUNT` and option letters
    /// outside `a..=d` are rejected; a repeated index overwrites the
    /// previous choice.
    pub fn record_answer(&mut self, question: u8, option: char) -> Result<()> {
        if !(1..=QUESTION_COUNT).contains(&question) {
            return Err(anyhow!("Question index {} out of range 1..={}", question, QUESTION_COUNT));
        }
        if !('a'..='d').contains(&option) {
            return Err(anyhow!("Option letter '{}' out of range a..=d", option));
        }
        self.pending_answers.insert(question, option);
        Ok(())
    }

    /// Number of questions answered so far via buttons
    pub fn answered_count(&self) -> usize {
        self.pending_answers.len()
    }

    /// Whether every question has a recorded button answer
    pub fn answers_complete(&self) -> bool {
        self.pending_answers.len() == QUESTION_COUNT as usize
    }

    /// Synthesize the combined answer line, e.g. `"1a, 2b, 3c"`
    pub fn combined_answers(&self) -> String {
        self.pending_answers
            .iter()
            .map(|(q, a)| format!("{}{}", q, a))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
