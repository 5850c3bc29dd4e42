//! Wire and domain types for cover-letter generation.
//!
//! `CoverLetterForm` is what arrives from the browser (raw, unchecked).
//! `GenerationRequest` is what leaves validation (normalised, safe to prompt with).
//! Nothing here is persisted; every value lives for a single request.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::generation::validation::{
    validate_description, validate_details, validate_link, validate_project_name, validate_skills,
};

// ────────────────────────────────────────────────────────────────────────────
// Raw form input
// ────────────────────────────────────────────────────────────────────────────

/// Skills as typed into the form ("React, TypeScript") or as an explicit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Text(String),
    List(Vec<String>),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::Text(String::new())
    }
}

impl SkillsInput {
    /// True when the user left the field untouched.
    pub fn is_absent(&self) -> bool {
        match self {
            SkillsInput::Text(text) => text.trim().is_empty(),
            SkillsInput::List(items) => items.is_empty(),
        }
    }

    /// Ordered, trimmed, non-blank skill tokens.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            SkillsInput::Text(text) => split_skills(text),
            SkillsInput::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Splits a comma-separated skills string, trimming each token and dropping blanks.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One project entry exactly as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(custom(function = "validate_project_name"))]
    pub name: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    /// Empty string means "no link".
    #[serde(default)]
    #[validate(custom(function = "validate_link"))]
    pub link: String,

    #[serde(default)]
    #[validate(custom(function = "validate_skills"))]
    pub skills: SkillsInput,

    #[validate(custom(function = "validate_details"))]
    pub details: String,
}

/// The full generator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CoverLetterForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub applicant_name: String,

    #[validate(length(min = 50, message = "Job description must be at least 50 characters."))]
    pub job_description: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add at least one project."), nested)]
    pub projects: Vec<ProjectInput>,
}

impl CoverLetterForm {
    /// Trims outer whitespace from every text field.
    pub fn normalized(self) -> Self {
        CoverLetterForm {
            applicant_name: self.applicant_name.trim().to_string(),
            job_description: self.job_description.trim().to_string(),
            projects: self
                .projects
                .into_iter()
                .map(|p| ProjectInput {
                    name: p.name.trim().to_string(),
                    description: p.description.trim().to_string(),
                    link: p.link.trim().to_string(),
                    skills: match p.skills {
                        SkillsInput::Text(text) => SkillsInput::Text(text.trim().to_string()),
                        list => list,
                    },
                    details: p.details.trim().to_string(),
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validated request
// ────────────────────────────────────────────────────────────────────────────

/// A project that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioProject {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub skills: Vec<String>,
    pub details: String,
}

/// A request that passed every field rule. Only `validation::validate_request`
/// constructs one outside tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub applicant_name: String,
    pub job_description: String,
    /// Never empty.
    pub projects: Vec<PortfolioProject>,
}

impl From<ProjectInput> for PortfolioProject {
    fn from(input: ProjectInput) -> Self {
        PortfolioProject {
            skills: input.skills.tokens(),
            link: Some(input.link).filter(|l| !l.is_empty()),
            name: input.name,
            description: input.description,
            details: input.details,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation report and generation result
// ────────────────────────────────────────────────────────────────────────────

/// A single rule violation, scoped to a field path such as `projects[0].link`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    Service,
}

/// Outcome of one generation exchange. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success { cover_letter: String },
    Failure { kind: FailureKind, reason: String },
}
