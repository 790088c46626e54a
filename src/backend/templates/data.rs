/**
 * Template Data
 *
 * The single value every page renders against. Handlers build it with
 * [`TemplateData::new`], which consumes the one-shot flash message and
 * makes sure the page has a CSRF token to embed, then attach whatever the
 * page needs.
 */

use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::Value;

use tower_sessions::Session;

use crate::backend::auth::FLASH_KEY;
use crate::backend::csrf;
use crate::backend::middleware::AuthContext;
use crate::backend::session::{pop_string, SessionError};
use crate::backend::snippets::Snippet;
use crate::backend::templates::TemplateError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub form: Value,
    pub not_found: bool,
}

impl TemplateData {
    pub async fn new(session: &Session, auth: &AuthContext) -> Result<Self, SessionError> {
        Ok(Self {
            current_year: Utc::now().year(),
            flash: pop_string(session, FLASH_KEY).await?,
            is_authenticated: auth.is_authenticated,
            csrf_token: csrf::token(session).await?,
            ..Self::default()
        })
    }

    /// Data for pages rendered without a session
    pub fn anonymous() -> Self {
        Self {
            current_year: Utc::now().year(),
            ..Self::default()
        }
    }

    /// Data for the not-found page, which never sees the session
    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Self::anonymous()
        }
    }

    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    /// Attach a form, including its validation state, for re-rendering
    pub fn with_form<F: Serialize>(mut self, form: &F) -> Result<Self, TemplateError> {
        self.form = serde_json::to_value(form)?;
        Ok(self)
    }
}
