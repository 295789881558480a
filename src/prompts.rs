/*!
 * Prompt engineering for exercise generation and grading.
 *
 * This module provides:
 * - The exercise-request template sent to the language model
 * - The grading-request template used to critique submitted answers
 *
 * Both builders are pure text rendering with no failure mode.
 */

/// Number of questions in every generated exercise
pub const QUESTION_COUNT: u8 = 3;

/// Template for requesting a new exercise.
const EXERCISE_TEMPLATE: &str = r#"You are a professional English tutor.
Create EXACTLY 3 {exercise_type} questions for a student with {level} English level on the topic "{topic}".

Important Instructions:
- DO NOT write your thought process, explanations, answers, or any additional text. ONLY QUESTIONS!
- Each question must contain exactly one blank "___".
- Each question must have exactly 4 answer choices labeled as a), b), c), d).
- Separate lines clearly by newline characters (\n). Do NOT use <br> tags.

Strict example of correct output (HTML):

<b>📝 Past Simple Exercise</b>

1️⃣ She ___ to school yesterday.
a) goes
b) go
c) went
d) going

2️⃣ They ___ dinner at 6 pm last night.
a) have
b) has
c) had
d) having

3️⃣ He ___ the book last week.
a) read
b) reading
c) reads
d) readed"#;

/// Template for requesting a graded critique of submitted answers.
const GRADING_TEMPLATE: &str = r#"You are a professional English tutor. You provided a student with the following exercise:

{exercise_text}

The student answered:
{user_answers}

Instructions for your reply:

- If all answers are correct, praise the student enthusiastically.
- If any answer is incorrect, clearly state:
  - Which answers are wrong.
  - The correct answers.
  - Short grammar explanation why the correct answers are right.

Provide the response clearly formatted using emojis and simple HTML formatting.

Example of correct output if all answers are right:

<b>🎉 Fantastic! All your answers are correct!</b> Keep up the great work! 🚀

Example if some answers are wrong:

<b>❌ Let's review your answers:</b>

- <b>Question 1:</b> Your answer: a ❌, Correct answer: c ✔️
  <i>"Went"</i> is correct because the action happened in the past (yesterday).

- <b>Question 3:</b> Your answer: b ❌, Correct answer: d ✔️
  <i>"Read"</i> is the correct past simple form (irregular verb).

Great effort! Review these rules and try again! 🌟"#;

/// Render the exercise-request prompt for the given level, topic and exercise type.
pub fn exercise_prompt(level: &str, topic: &str, exercise_type: &str) -> String {
    EXERCISE_TEMPLATE
        .replace("{exercise_type}", exercise_type)
        .replace("{level}", level)
        .replace("{topic}", topic)
}

/// Render the grading-request prompt for a previously generated exercise
/// and the answers the student submitted.
pub fn grading_prompt(exercise_text: &str, user_answers: &str) -> String {
    GRADING_TEMPLATE
        .replace("{exercise_text}", exercise_text)
        .replace("{user_answers}", user_answers)
}
