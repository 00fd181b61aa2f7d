//! Prompt renderer: pure, deterministic assembly of assessment parameters
//! into the text sent to the generation endpoint. No I/O, no side effects.
//!
//! Two variants: the full assessment (preamble, parameters block, task
//! instructions, per-type guidance, output format) and a single question
//! scoped to one topic.

use crate::assessment::params::AssessmentParams;
use crate::assessment::prompts::{
    ASSESSMENT_OUTPUT_FORMAT, DEFAULT_QUESTION_TYPE, QUESTION_TYPE_GUIDANCE,
    SINGLE_QUESTION_OUTPUT_FORMAT,
};

/// Renders the full-assessment prompt for a role.
///
/// Parameter lines for question types, skills, and company context are only
/// emitted when non-empty, listed in input order. Guidance paragraphs are
/// appended for each recognized question type in vocabulary order.
pub fn render_full_prompt(role: &str, params: &AssessmentParams) -> String {
    let mut prompt = format!(
        r#"You are an expert job assessment designer with years of experience creating effective hiring assessments for top companies.

Your task is to create a professional job assessment for the role of "{role}" based on the following parameters:

ASSESSMENT PARAMETERS:
- Time limit: {time_limit} minutes
- Difficulty level: {difficulty}
- Performance weight: {performance}%
- Behavioral weight: {behavioral}%
- Cultural fit weight: {cultural_fit}%
"#,
        role = role,
        time_limit = params.time_limit,
        difficulty = params.difficulty.label(),
        performance = params.weights.performance,
        behavioral = params.weights.behavioral,
        cultural_fit = params.weights.cultural_fit,
    );

    if !params.question_types.is_empty() {
        prompt.push_str(&format!(
            "- Question types: {}\n",
            params.question_types.join(", ")
        ));
    }
    if !params.skills.is_empty() {
        prompt.push_str(&format!("- Skills to assess: {}\n", params.skills.join(", ")));
    }
    if !params.company_context.is_empty() {
        prompt.push_str(&format!(
            "- Company context: {}\n",
            params.company_context.join(", ")
        ));
    }

    prompt.push_str(&format!(
        r#"
Please create a comprehensive assessment that:
1. Is appropriate for the specified time limit of {time_limit} minutes
2. Balances performance, behavioral, and cultural fit according to the weights
3. Tests the specific skills requested
4. Incorporates the company context naturally
5. Matches the {difficulty} difficulty level
"#,
        time_limit = params.time_limit,
        difficulty = params.difficulty.label(),
    ));

    for (label, guidance) in QUESTION_TYPE_GUIDANCE {
        if params.question_types.iter().any(|t| t == label) {
            prompt.push_str(&format!("\n{guidance}\n"));
        }
    }

    prompt.push_str(ASSESSMENT_OUTPUT_FORMAT);
    prompt
}

/// Renders a prompt for one question scoped to a specific assessment area.
///
/// The question type is the first listed type, falling back to
/// open-ended questions when the prompt lists none.
pub fn render_single_question_prompt(role: &str, topic: &str, params: &AssessmentParams) -> String {
    let question_type = params
        .question_types
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_QUESTION_TYPE);

    let mut prompt = format!(
        r#"You are an expert job assessment designer. Create a professional {difficulty}-level {question_type} for a {role} position based on this specific area:

ASSESSMENT AREA: {topic}

PARAMETERS:
- Time to answer: {time_limit} minutes
- Difficulty: {difficulty}
- Question type: {question_type}
"#,
        role = role,
        topic = topic,
        time_limit = params.time_limit,
        difficulty = params.difficulty.label(),
        question_type = question_type,
    );

    if !params.skills.is_empty() {
        prompt.push_str(&format!("- Skills to assess: {}\n", params.skills.join(", ")));
    }
    if !params.company_context.is_empty() {
        prompt.push_str(&format!(
            "- Company context: {}\n",
            params.company_context.join(", ")
        ));
    }

    prompt.push_str(SINGLE_QUESTION_OUTPUT_FORMAT);
    prompt
}
