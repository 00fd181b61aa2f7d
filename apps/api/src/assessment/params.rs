//! Typed assessment parameters: every recognized option and its default in
//! one place, normalized once at the orchestrator boundary.

use serde::{Deserialize, Serialize};

use crate::models::prompt::PromptRow;

/// Default assessment duration in minutes when a prompt does not specify one.
pub const DEFAULT_FULL_TIME_LIMIT: i32 = 30;
/// Default answer time in minutes for a single generated question.
pub const DEFAULT_SINGLE_QUESTION_TIME_LIMIT: i32 = 15;

/// Assessment difficulty. Stored lowercase, rendered with the canonical
/// capitalized label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Canonical label used in rendered prompt text.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Lowercase key used in the database CHECK constraint.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Accepted JSON shapes for a difficulty field: a bare label or a list of
/// labels. For a list, only the first element is used; an empty list falls
/// back to the default. This quirk is a documented normalization rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DifficultyInput {
    One(String),
    Many(Vec<String>),
}

impl DifficultyInput {
    /// Normalizes to a single difficulty. `None` means the label (or the
    /// first label of a list) was not recognized.
    pub fn normalize(&self) -> Option<Difficulty> {
        match self {
            DifficultyInput::One(label) => Difficulty::parse(label),
            DifficultyInput::Many(labels) => match labels.first() {
                Some(label) => Difficulty::parse(label),
                None => Some(Difficulty::default()),
            },
        }
    }
}

/// Scoring weights as integer percentages. Intended to sum to 100, never
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default = "default_performance_weight")]
    pub performance: i32,
    #[serde(default = "default_behavioral_weight")]
    pub behavioral: i32,
    #[serde(default = "default_cultural_fit_weight")]
    pub cultural_fit: i32,
}

fn default_performance_weight() -> i32 {
    33
}

fn default_behavioral_weight() -> i32 {
    33
}

fn default_cultural_fit_weight() -> i32 {
    34
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            performance: default_performance_weight(),
            behavioral: default_behavioral_weight(),
            cultural_fit: default_cultural_fit_weight(),
        }
    }
}

/// Fully-resolved parameters handed to the prompt renderer. Constructing one
/// of these is the only place prompt-row fields are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentParams {
    pub time_limit: i32,
    pub difficulty: Difficulty,
    pub question_types: Vec<String>,
    pub skills: Vec<String>,
    pub company_context: Vec<String>,
    pub weights: Weights,
}

impl Default for AssessmentParams {
    fn default() -> Self {
        AssessmentParams {
            time_limit: DEFAULT_FULL_TIME_LIMIT,
            difficulty: Difficulty::default(),
            question_types: Vec::new(),
            skills: Vec::new(),
            company_context: Vec::new(),
            weights: Weights::default(),
        }
    }
}

impl AssessmentParams {
    /// Builds renderer parameters from a stored prompt, with the company
    /// context resolved to its display name (or omitted when the prompt has
    /// no company, or the company no longer exists).
    pub fn from_prompt(prompt: &PromptRow, company_name: Option<String>) -> Self {
        AssessmentParams {
            time_limit: prompt.time_limit,
            difficulty: Difficulty::parse(&prompt.difficulty).unwrap_or_default(),
            question_types: prompt.question_types.clone(),
            skills: prompt.skills.clone(),
            company_context: company_name.into_iter().collect(),
            weights: Weights {
                performance: prompt.performance_weight,
                behavioral: prompt.behavioral_weight,
                cultural_fit: prompt.cultural_fit_weight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn prompt_row() -> PromptRow {
        PromptRow {
            id: Uuid::new_v4(),
            prompt_text: "Backend Engineer".to_string(),
            time_limit: 45,
            performance_weight: 50,
            behavioral_weight: 30,
            cultural_fit_weight: 20,
            difficulty: "hard".to_string(),
            question_types: vec!["Coding challenges".to_string()],
            skills: vec!["Go".to_string(), "SQL".to_string()],
            company_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("  Easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("extreme"), None);
    }

    #[test]
    fn test_list_and_scalar_normalize_identically() {
        let scalar = DifficultyInput::One("Hard".to_string());
        let list = DifficultyInput::Many(vec!["Hard".to_string()]);
        assert_eq!(scalar.normalize(), list.normalize());
        assert_eq!(scalar.normalize(), Some(Difficulty::Hard));
    }

    #[test]
    fn test_list_first_element_wins() {
        let input = DifficultyInput::Many(vec!["easy".to_string(), "hard".to_string()]);
        assert_eq!(input.normalize(), Some(Difficulty::Easy));
    }

    #[test]
    fn test_empty_list_falls_back_to_default() {
        let input = DifficultyInput::Many(vec![]);
        assert_eq!(input.normalize(), Some(Difficulty::Medium));
    }

    #[test]
    fn test_unrecognized_label_is_rejected() {
        assert_eq!(DifficultyInput::One("brutal".to_string()).normalize(), None);
        assert_eq!(
            DifficultyInput::Many(vec!["brutal".to_string()]).normalize(),
            None
        );
    }

    #[test]
    fn test_difficulty_input_deserializes_both_shapes() {
        let scalar: DifficultyInput = serde_json::from_value(serde_json::json!("hard")).unwrap();
        let list: DifficultyInput = serde_json::from_value(serde_json::json!(["hard"])).unwrap();
        assert_eq!(scalar.normalize(), Some(Difficulty::Hard));
        assert_eq!(list.normalize(), Some(Difficulty::Hard));
    }

    #[test]
    fn test_weights_default_to_33_33_34() {
        let w = Weights::default();
        assert_eq!((w.performance, w.behavioral, w.cultural_fit), (33, 33, 34));
    }

    #[test]
    fn test_weights_partial_json_fills_defaults() {
        let w: Weights = serde_json::from_value(serde_json::json!({"performance": 60})).unwrap();
        assert_eq!((w.performance, w.behavioral, w.cultural_fit), (60, 33, 34));
    }

    #[test]
    fn test_from_prompt_maps_all_fields() {
        let row = prompt_row();
        let params = AssessmentParams::from_prompt(&row, Some("Acme Corp".to_string()));
        assert_eq!(params.time_limit, 45);
        assert_eq!(params.difficulty, Difficulty::Hard);
        assert_eq!(params.skills, vec!["Go", "SQL"]);
        assert_eq!(params.company_context, vec!["Acme Corp"]);
        assert_eq!(params.weights.performance, 50);
        assert_eq!(params.weights.behavioral, 30);
        assert_eq!(params.weights.cultural_fit, 20);
    }

    #[test]
    fn test_from_prompt_without_company_has_empty_context() {
        let params = AssessmentParams::from_prompt(&prompt_row(), None);
        assert!(params.company_context.is_empty());
    }
}
