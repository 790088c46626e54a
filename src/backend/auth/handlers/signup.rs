/**
 * Signup Handlers
 *
 * `GET /user/signup` shows the form; `POST /user/signup` creates the account.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Create the user (the repository hashes the password)
 * 3. Flash a confirmation and redirect to the login page
 *
 * A taken email is a field error on the form, not a server fault.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::backend::auth::handlers::types::SignupForm;
use crate::backend::auth::FLASH_KEY;
use crate::backend::error::{AppError, ModelError};
use crate::backend::forms::PostForm;
use crate::backend::middleware::AuthContext;
use crate::backend::server::state::AppState;
use crate::backend::templates::{render_page, TemplateData};

pub async fn user_signup(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let data = TemplateData::new(&session, &auth)
        .await?
        .with_form(&SignupForm::default())?;
    render_page(&app_state.templates, StatusCode::OK, "signup", &data)
}

pub async fn user_signup_post(
    State(app_state): State<AppState>,
    session: Session,
    auth: AuthContext,
    PostForm(mut form): PostForm<SignupForm>,
) -> Result<Response, AppError> {
    form.validate();

    if form.validator.valid() {
        match app_state
            .users
            .insert(&form.name, &form.email, &form.password)
            .await
        {
            Ok(()) => {
                tracing::info!(email = %form.email, "user signed up");
                session
                    .insert(FLASH_KEY, "Your signup was successful. Please log in.")
                    .await?;
                return Ok(Redirect::to("/user/login").into_response());
            }
            Err(ModelError::DuplicateEmail) => {
                form.validator
                    .add_field_error("email", "Email address is already in use");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = TemplateData::new(&session, &auth).await?.with_form(&form)?;
    render_page(
        &app_state.templates,
        StatusCode::UNPROCESSABLE_ENTITY,
        "signup",
        &data,
    )
}
