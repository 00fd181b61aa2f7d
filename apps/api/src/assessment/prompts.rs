// Fixed text blocks for the assessment prompt renderer. Parameterized
// sections are assembled in renderer.rs; everything here is constant.

/// Question-type vocabulary paired with the guidance paragraph appended for
/// each recognized type. Table order is the canonical guidance order,
/// regardless of the order a caller lists the types in.
pub const QUESTION_TYPE_GUIDANCE: [(&str, &str); 4] = [
    (
        "Multiple-choice questions",
        "Include multiple-choice questions with 4-5 options each and clearly mark the correct answer for the hiring manager.",
    ),
    (
        "Situational judgment tests",
        "Include realistic workplace scenarios with multiple possible responses, ranking from most to least effective.",
    ),
    (
        "Open-ended questions",
        "Include thought-provoking open-ended questions with sample strong answers and evaluation criteria.",
    ),
    (
        "Coding challenges",
        "Include practical coding challenges with clear requirements, sample solutions, and evaluation rubrics.",
    ),
];

/// Question type used for single-question generation when the prompt lists
/// none.
pub const DEFAULT_QUESTION_TYPE: &str = "Open-ended questions";

/// Closing section of the full-assessment prompt: the five-part response
/// structure every generated assessment must follow.
pub const ASSESSMENT_OUTPUT_FORMAT: &str = r#"
FORMAT YOUR RESPONSE WITH THE FOLLOWING SECTIONS:

ASSESSMENT OVERVIEW:
[Brief summary of the assessment, appropriate skills tested, and how it relates to the role]

ASSESSMENT QUESTIONS:
[Numbered questions with clear instructions]

EVALUATION GUIDELINES:
[Detailed criteria for hiring managers to evaluate responses, including what constitutes poor, acceptable, and excellent answers]

TIME ALLOCATION:
[Suggested breakdown of how candidates should use their time]

Each question should clearly indicate whether it's primarily assessing performance, behavioral attributes, or cultural fit.
"#;

/// Closing section of the single-question prompt.
pub const SINGLE_QUESTION_OUTPUT_FORMAT: &str = r#"
FORMAT YOUR RESPONSE WITH:

QUESTION TITLE: [Brief descriptive title]

SCENARIO: [Any relevant context or situation]

MAIN QUESTION: [Clear, concise question]

INSTRUCTIONS: [How the candidate should approach the answer]

EVALUATION CRITERIA: [Hidden from candidate - specific points the hiring manager should look for]

Make the question challenging but fair, relevant to the role, and designed to reveal meaningful insights about the candidate's abilities.
"#;
