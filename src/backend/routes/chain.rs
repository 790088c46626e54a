/**
 * Middleware Chains
 *
 * Three ordered chains, listed outermost first:
 *
 * ```text
 * standard   recover_panic -> TraceLayer -> secure_headers -> render_not_found
 * dynamic    SessionManagerLayer -> save_on_panic -> verify_csrf -> authenticate
 * protected  dynamic -> require_authentication
 * ```
 *
 * The standard chain wraps the whole router, so panic recovery and security
 * headers always sit outside the session, CSRF and auth layers. The dynamic
 * and protected chains are applied with `route_layer`, so they only run for
 * matched routes.
 *
 * `ServiceBuilder` applies layers top to bottom, outermost first; plain
 * `Router::layer` calls wrap from the inside out, which is why the chains
 * below go through `ServiceBuilder`.
 */

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::backend::csrf::verify_csrf;
use crate::backend::middleware::{
    authenticate, recover_panic, render_not_found, request_span, require_authentication,
    secure_headers,
};
use crate::backend::server::state::AppState;
use crate::backend::session::{save_on_panic, session_layer};

/// Wrap the complete router in the standard chain
pub fn standard(router: Router, app_state: &AppState) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(recover_panic))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(middleware::from_fn(secure_headers))
            .layer(middleware::from_fn_with_state(
                app_state.templates.clone(),
                render_not_found,
            )),
    )
}

/// Apply session, CSRF and auth derivation to every route in `router`
pub fn dynamic(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router.route_layer(
        ServiceBuilder::new()
            .layer(session_layer(
                app_state.sessions.clone(),
                &app_state.session_config,
            ))
            .layer(middleware::from_fn(save_on_panic))
            .layer(middleware::from_fn(verify_csrf))
            .layer(middleware::from_fn_with_state(
                app_state.clone(),
                authenticate,
            )),
    )
}

/// Dynamic chain plus auth enforcement
pub fn protected(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let enforced = router.route_layer(middleware::from_fn(require_authentication));
    dynamic(enforced, app_state)
}
