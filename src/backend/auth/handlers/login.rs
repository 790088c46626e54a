/**
 * Login Handlers
 *
 * `GET /user/login` shows the form; `POST /user/login` checks credentials
 * and moves the session from Anonymous to Authenticated.
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same non-field error
 * - The session token is rotated before the identity is stored
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::backend::auth::handlers::types::LoginForm;
use crate::backend::auth::state::log_in;
use crate::backend::error::{AppError, ModelError};
use crate::backend::forms::PostForm;
use crate::backend::middleware::AuthContext;
use crate::backend::server::state::AppState;
use crate::backend::templates::{render_page, TemplateData};

/// Where a successful login lands
pub const AFTER_LOGIN_PATH: &str = "/snippet/create";

pub async fn user_login(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let data = TemplateData::new(&session, &auth)
        .await?
        .with_form(&LoginForm::default())?;
    render_page(&app_state.templates, StatusCode::OK, "login", &data)
}

pub async fn user_login_post(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
    PostForm(mut form): PostForm<LoginForm>,
) -> Result<Response, AppError> {
    form.validate();

    if form.validator.valid() {
        match app_state.users.authenticate(&form.email, &form.password).await {
            Ok(user_id) => {
                log_in(&session, user_id).await?;
                return Ok(Redirect::to(AFTER_LOGIN_PATH).into_response());
            }
            Err(ModelError::InvalidCredentials) => {
                tracing::debug!("login rejected: invalid credentials");
                form.validator
                    .add_non_field_error("Email or password is incorrect");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = TemplateData::new(&session, &auth).await?.with_form(&form)?;
    render_page(
        &app_state.templates,
        StatusCode::UNPROCESSABLE_ENTITY,
        "login",
        &data,
    )
}
