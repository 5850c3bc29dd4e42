//! The one rule set for cover-letter input.
//!
//! Field rules are declared on `CoverLetterForm` / `ProjectInput`; this module
//! holds the custom checks they reference and `validate_request`, which both
//! the `/validate` endpoint and the generation boundary call.

use std::borrow::Cow;

use reqwest::Url;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::generation::models::{
    CoverLetterForm, FieldViolation, GenerationRequest, PortfolioProject, SkillsInput,
    ValidationReport,
};

/// Normalises and checks a submitted form.
///
/// Returns the validated request, or every violation sorted by field path.
pub fn validate_request(form: CoverLetterForm) -> Result<GenerationRequest, Vec<FieldViolation>> {
    let form = form.normalized();

    if let Err(errors) = form.validate() {
        return Err(flatten_errors(&errors));
    }

    Ok(GenerationRequest {
        applicant_name: form.applicant_name,
        job_description: form.job_description,
        projects: form.projects.into_iter().map(PortfolioProject::from).collect(),
    })
}

/// Runs the rule set without building a request.
pub fn check_form(form: CoverLetterForm) -> ValidationReport {
    match validate_request(form) {
        Ok(_) => ValidationReport {
            valid: true,
            violations: vec![],
        },
        Err(violations) => ValidationReport {
            valid: false,
            violations,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Custom field checks
// ────────────────────────────────────────────────────────────────────────────

pub fn validate_project_name(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Project name is required.")
}

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Description is required.")
}

pub fn validate_details(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Details are required.")
}

fn require_text(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

/// Empty means "no link". Anything else must be an absolute http(s) URL with a host.
pub fn validate_link(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    let well_formed = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::Borrowed("Must be a valid URL.")))
    }
}

/// An untouched skills field is fine; a filled-in one must yield at least one token.
pub fn validate_skills(skills: &SkillsInput) -> Result<(), ValidationError> {
    if skills.is_absent() || !skills.tokens().is_empty() {
        return Ok(());
    }
    Err(ValidationError::new("skills")
        .with_message(Cow::Borrowed("Please list at least one skill.")))
}

// ────────────────────────────────────────────────────────────────────────────
// Error flattening
// ────────────────────────────────────────────────────────────────────────────

/// Converts validator's nested error tree into flat `field -> message` pairs.
fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    collect_violations("", errors, &mut violations);
    violations.sort();
    violations
}

fn collect_violations(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(FieldViolation {
                        field: path.clone(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", error.code)),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_violations(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
