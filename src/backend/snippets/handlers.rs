/**
 * Snippet Handlers
 *
 * - `GET /` - latest snippets
 * - `GET /snippet/view/{id}` - one snippet; bad or unknown ids are a 404
 * - `GET /snippet/create` - empty create form
 * - `POST /snippet/create` - validate, store, redirect to the new snippet
 * - `GET /ping` - health check
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::backend::auth::FLASH_KEY;
use crate::backend::error::AppError;
use crate::backend::forms::PostForm;
use crate::backend::middleware::AuthContext;
use crate::backend::server::state::AppState;
use crate::backend::templates::{render_page, TemplateData};
use crate::shared::validator::{self, Validator};

/// Expiry choices offered by the create form, in days
pub const PERMITTED_EXPIRES: [i32; 3] = [1, 7, 365];

/// Body of `POST /snippet/create`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// The form as first shown: a year's expiry preselected
    pub fn blank() -> Self {
        Self {
            expires: 365,
            ..Self::default()
        }
    }

    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            validator::not_blank(&self.title),
            "title",
            "This field cannot be blank",
        );
        v.check_field(
            validator::max_chars(&self.title, 100),
            "title",
            "This field cannot be more than 100 characters long",
        );
        v.check_field(
            validator::not_blank(&self.content),
            "content",
            "This field cannot be blank",
        );
        v.check_field(
            validator::permitted_value(&self.expires, &PERMITTED_EXPIRES),
            "expires",
            "This field can only be 1, 7 or 365",
        );
    }
}

pub async fn ping() -> &'static str {
    "OK"
}

pub async fn home(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let snippets = app_state.snippets.latest().await?;

    let data = TemplateData::new(&session, &auth)
        .await?
        .with_snippets(snippets);
    render_page(&app_state.templates, StatusCode::OK, "home", &data)
}

pub async fn snippet_view(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: i64 = match id.parse() {
        Ok(id) if id >= 1 => id,
        _ => return Err(AppError::NotFound),
    };

    let snippet = app_state.snippets.get(id).await?;

    let data = TemplateData::new(&session, &auth)
        .await?
        .with_snippet(snippet);
    render_page(&app_state.templates, StatusCode::OK, "view", &data)
}

pub async fn snippet_create(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let data = TemplateData::new(&session, &auth)
        .await?
        .with_form(&SnippetCreateForm::blank())?;
    render_page(&app_state.templates, StatusCode::OK, "create", &data)
}

pub async fn snippet_create_post(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
    PostForm(mut form): PostForm<SnippetCreateForm>,
) -> Result<Response, AppError> {
    form.validate();
    if !form.validator.valid() {
        let data = TemplateData::new(&session, &auth).await?.with_form(&form)?;
        return render_page(
            &app_state.templates,
            StatusCode::UNPROCESSABLE_ENTITY,
            "create",
            &data,
        );
    }

    let id = app_state
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;
    tracing::info!(snippet_id = id, "snippet created");

    session
        .insert(FLASH_KEY, "Snippet successfully created!")
        .await?;
    Ok(Redirect::to(&format!("/snippet/view/{}", id)).into_response())
}
