/*!
 * Post-processing of raw model output before it is shown to the user.
 *
 * Reasoning-capable models wrap their chain of thought in `<think>` tags and
 * sometimes append an answer key even when told not to. Generated exercises
 * are cleaned here; grading responses are delivered untouched.
 */

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"<think>.*?</think>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("valid think-block regex")
});

static ANSWERS_SECTION: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"Answers:")
        .case_insensitive(true)
        .build()
        .expect("valid answers-section regex")
});

static EXPLANATIONS_SECTION: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"Explanations:")
        .case_insensitive(true)
        .build()
        .expect("valid explanations-section regex")
});

/// Clean a raw exercise generation: drop reasoning blocks, cut any trailing
/// answer key or explanation section, and trim surrounding whitespace.
pub fn clean_exercise_text(raw: &str) -> String {
    let without_think = THINK_BLOCK.replace_all(raw, "");
    let mut text = without_think.trim();

    if let Some(m) = ANSWERS_SECTION.find(text) {
        text = text[..m.start()].trim_end();
    }
    if let Some(m) = EXPLANATIONS_SECTION.find(text) {
        text = text[..m.start()].trim_end();
    }

    text.trim().to_string()
}
