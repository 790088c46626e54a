/**
 * Request Logging
 *
 * Requests are logged by tower-http's `TraceLayer` in the standard chain.
 * This module supplies its span, which carries the remote address taken
 * from `ConnectInfo`. The address is only known when the server was started
 * with `into_make_service_with_connect_info`; otherwise it is logged as `-`.
 */

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use tracing::Span;

/// Span for one request: remote address, protocol, method and URI
pub fn request_span(request: &Request) -> Span {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info_span!(
        "request",
        %remote_addr,
        proto = ?request.version(),
        method = %request.method(),
        uri = %request.uri(),
    )
}
