//! Server-rendered portfolio pages: landing page and cover letter generator.
//!
//! Templates are compiled once at startup; HTML output is autoescaped by tera.

pub mod content;
pub mod handlers;

use chrono::{Datelike, Utc};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::site::content::SiteContent;

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const COVER_LETTER_TEMPLATE: &str = include_str!("../../templates/cover_letter.html");

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to read site content from {path}: {source}")]
    ContentRead {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid site content: {0}")]
    ContentParse(#[from] serde_json::Error),
}

/// A page the header navigation knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    CoverLetter,
}

impl Page {
    fn template(self) -> &'static str {
        match self {
            Page::Home => "home.html",
            Page::CoverLetter => "cover_letter.html",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::CoverLetter => "/cover-letter-generator",
        }
    }
}

#[derive(Serialize)]
struct PageContext<'a> {
    site: &'a SiteContent,
    active_path: &'static str,
    year: i32,
}

/// Compiled templates plus the content they render.
pub struct SitePages {
    tera: Tera,
    content: SiteContent,
}

impl SitePages {
    pub fn new(content: SiteContent) -> Result<Self, SiteError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("cover_letter.html", COVER_LETTER_TEMPLATE),
        ])?;
        Ok(Self { tera, content })
    }

    pub fn render(&self, page: Page) -> Result<String, SiteError> {
        let context = Context::from_serialize(PageContext {
            site: &self.content,
            active_path: page.path(),
            year: Utc::now().year(),
        })?;
        Ok(self.tera.render(page.template(), &context)?)
    }
}
