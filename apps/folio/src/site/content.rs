//! Portfolio content shown on the landing page.
//!
//! Ships with built-in defaults; a JSON file (`SITE_CONTENT_PATH`) can replace them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::site::SiteError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedProject {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub live_url: String,
    pub repo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLinks {
    pub email: Option<String>,
    pub github_url: String,
    pub linkedin_url: String,
    #[serde(default)]
    pub extra: Vec<ExternalLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    pub brand: String,
    pub owner_name: String,
    pub tagline: String,
    pub avatar_url: Option<String>,
    pub resume_url: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<FeaturedProject>,
    pub contact_blurb: String,
    pub contact: ContactLinks,
}

impl SiteContent {
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::ContentRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        SiteContent {
            brand: "Nextfolio".to_string(),
            owner_name: "Pankaj Yadav".to_string(),
            tagline: "A passionate developer specializing in building modern, scalable, \
                and user-friendly web applications."
                .to_string(),
            avatar_url: None,
            resume_url: "#".to_string(),
            skills: [
                "React / Next.js",
                "TypeScript",
                "Node.js",
                "SQL & NoSQL",
                "React Native",
                "UI/UX Design",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            projects: vec![
                FeaturedProject {
                    name: "E-commerce Platform".to_string(),
                    description: "A full-stack e-commerce solution with a custom CMS, payment \
                        gateway integration, and a rich user interface."
                        .to_string(),
                    image_url: None,
                    tags: tags(&["Next.js", "TypeScript", "Stripe", "PostgreSQL"]),
                    live_url: "#".to_string(),
                    repo_url: "#".to_string(),
                },
                FeaturedProject {
                    name: "SaaS Dashboard".to_string(),
                    description: "A multi-tenant SaaS dashboard for data visualization and \
                        user management, featuring real-time updates."
                        .to_string(),
                    image_url: None,
                    tags: tags(&["Next.js", "React", "Recharts", "Firebase"]),
                    live_url: "#".to_string(),
                    repo_url: "#".to_string(),
                },
                FeaturedProject {
                    name: "AI Cover Letter Generator".to_string(),
                    description: "This portfolio's own tool for generating personalized cover \
                        letters from a job description and your projects."
                        .to_string(),
                    image_url: None,
                    tags: tags(&["Rust", "axum", "LLM"]),
                    live_url: "/cover-letter-generator".to_string(),
                    repo_url: "#".to_string(),
                },
            ],
            contact_blurb: "I'm currently open to new opportunities. Feel free to reach out \
                via email or connect with me on GitHub."
                .to_string(),
            contact: ContactLinks {
                email: Some("hello@example.com".to_string()),
                github_url: "#".to_string(),
                linkedin_url: "#".to_string(),
                extra: vec![],
            },
        }
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
