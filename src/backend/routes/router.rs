/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route groups into a single Axum router.
 *
 * # Route Groups
 *
 * 1. Bare routes: `/static/...` and `/ping`, no session
 * 2. Dynamic routes: session, CSRF check and auth derivation
 * 3. Protected routes: dynamic plus auth enforcement
 * 4. Fallback: the not-found page
 *
 * Everything, including the fallback, is wrapped in the standard chain.
 */

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::backend::auth::handlers::{
    user_login, user_login_post, user_logout_post, user_signup, user_signup_post,
};
use crate::backend::error::AppError;
use crate::backend::routes::chain;
use crate::backend::server::state::AppState;
use crate::backend::snippets::handlers::{
    home, ping, snippet_create, snippet_create_post, snippet_view,
};

/// Unknown routes
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// | Method   | Path                | Chain      |
/// |----------|---------------------|------------|
/// | GET      | `/static/...`       | none       |
/// | GET      | `/ping`             | none       |
/// | GET      | `/`                 | dynamic    |
/// | GET      | `/snippet/view/{id}`| dynamic    |
/// | GET,POST | `/user/signup`      | dynamic    |
/// | GET,POST | `/user/login`       | dynamic    |
/// | GET,POST | `/snippet/create`   | protected  |
/// | POST     | `/user/logout`      | protected  |
pub fn create_router(app_state: AppState) -> Router {
    let dynamic = chain::dynamic(
        Router::new()
            .route("/", get(home))
            .route("/snippet/view/{id}", get(snippet_view))
            .route("/user/signup", get(user_signup).post(user_signup_post))
            .route("/user/login", get(user_login).post(user_login_post)),
        &app_state,
    );

    let protected = chain::protected(
        Router::new()
            .route(
                "/snippet/create",
                get(snippet_create).post(snippet_create_post),
            )
            .route("/user/logout", axum::routing::post(user_logout_post)),
        &app_state,
    );

    let router = Router::new()
        .nest_service("/static", ServeDir::new(&app_state.static_dir))
        .route("/ping", get(ping))
        .merge(dynamic)
        .merge(protected)
        .fallback(not_found)
        .with_state(app_state.clone());

    chain::standard(router, &app_state)
}
