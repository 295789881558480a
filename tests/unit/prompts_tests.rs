/*!
 * Tests for prompt template rendering
 */

use tutorbot::prompts::{QUESTION_COUNT, exercise_prompt, grading_prompt};

#[test]
fn test_exercisePrompt_withTypicalInput_shouldContainInstructions() {
    let prompt = exercise_prompt("Beginner", "Present Continuous", "multiple-choice");

    assert!(prompt.contains("professional English tutor"));
    assert!(prompt.contains("EXACTLY 3 multiple-choice questions"));
    assert!(prompt.contains("Beginner English level"));
    assert!(prompt.contains("\"Present Continuous\""));
    assert!(prompt.contains("a), b), c), d)"));
}

#[test]
fn test_exercisePrompt_withQuestionCount_shouldStayInSyncWithConstant() {
    // The template hard-codes the question count; keep them aligned
    let prompt = exercise_prompt("Advanced", "Gerunds", "multiple-choice");
    assert!(prompt.contains(&format!("EXACTLY {}", QUESTION_COUNT)));
}

#[test]
fn test_gradingPrompt_withExerciseAndAnswers_shouldEmbedBoth() {
    let prompt = grading_prompt("1️⃣ She ___ home.\na) go\nb) went", "1b, 2a, 3c");

    assert!(prompt.contains("1️⃣ She ___ home."));
    assert!(prompt.contains("The student answered:\n1b, 2a, 3c"));
    assert!(prompt.contains("praise the student"));
}

#[test]
fn test_prompts_withAnyInput_shouldLeaveNoPlaceholders() {
    let exercise = exercise_prompt("Intermediate", "Articles", "multiple-choice");
    let grading = grading_prompt("body", "answers");

    for rendered in [exercise, grading] {
        assert!(!rendered.contains("{level}"));
        assert!(!rendered.contains("{topic}"));
        assert!(!rendered.contains("{exercise_type}"));
        assert!(!rendered.contains("{exercise_text}"));
        assert!(!rendered.contains("{user_answers}"));
    }
}
