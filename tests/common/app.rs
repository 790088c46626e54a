//! In-memory application harness
//!
//! Serves the full router over in-memory stores through
//! `axum_test::TestServer`, which keeps the session cookie between requests
//! like a browser would. The harness also remembers the current session id
//! so tests can inspect the stored session record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{http::header::LOCATION, http::header::SET_COOKIE, Router};
use axum_test::{TestResponse, TestServer};
use regex::Regex;
use serde_json::Value;
use time::OffsetDateTime;
use tower_sessions::cookie::Cookie;
use tower_sessions::session::{Id, Record};
use tower_sessions::{MemoryStore, SessionStore};

use snipbox::backend::auth::{MemoryUsers, UserRepository};
use snipbox::backend::middleware::AuthPolicy;
use snipbox::backend::routes::create_router;
use snipbox::backend::server::AppState;
use snipbox::backend::session::{SessionBackend, SessionConfig};
use snipbox::backend::snippets::MemorySnippets;
use snipbox::backend::templates::TemplateCache;

pub const TEST_NAME: &str = "Alice";
pub const TEST_EMAIL: &str = "alice@example.com";
pub const TEST_PASSWORD: &str = "pa$$word123";

/// Path to the shipped `ui/html` templates
pub fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("ui").join("html")
}

/// Path to the shipped `ui/static` assets
pub fn static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("ui").join("static")
}

/// Session settings for tests: plain HTTP, default cookie name
pub fn session_config() -> SessionConfig {
    SessionConfig {
        secure: false,
        ..SessionConfig::default()
    }
}

/// Build an `AppState` over the given stores
pub fn test_state(
    snippets: Arc<MemorySnippets>,
    users: Arc<MemoryUsers>,
    sessions: MemoryStore,
    templates: TemplateCache,
) -> AppState {
    AppState {
        snippets,
        users,
        templates: Arc::new(templates),
        sessions: SessionBackend::Memory(sessions),
        session_config: session_config(),
        auth_policy: AuthPolicy::RecheckUser,
        static_dir: static_dir(),
    }
}

/// Header helpers for `axum_test` responses
pub trait ResponseExt {
    /// `Location` of a redirect
    fn redirect_location(&self) -> Option<String>;

    fn header_str(&self, name: &str) -> Option<String>;

    /// The session cookie set by this response, if any
    fn session_cookie(&self) -> Option<Cookie<'static>>;
}

impl ResponseExt for TestResponse {
    fn redirect_location(&self) -> Option<String> {
        self.header_str(LOCATION.as_str())
    }

    fn header_str(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    fn session_cookie(&self) -> Option<Cookie<'static>> {
        let name = session_config().cookie_name;
        self.headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse(value.to_string()).ok())
            .find(|cookie| cookie.name() == name)
    }
}

/// Extract the CSRF token rendered into a page's hidden form field
pub fn extract_csrf_token(body: &str) -> Option<String> {
    let pattern = Regex::new(r#"name='csrf_token' value='([^']+)'"#).ok()?;
    pattern
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
}

/// The full application over in-memory stores
pub struct TestApp {
    pub server: TestServer,
    pub snippets: Arc<MemorySnippets>,
    pub users: Arc<MemoryUsers>,
    pub sessions: MemoryStore,
    session_token: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        let templates = TemplateCache::from_dir(template_dir()).expect("shipped templates compile");
        Self::with_templates(templates)
    }

    pub fn with_templates(templates: TemplateCache) -> Self {
        Self::build(templates, create_router)
    }

    /// Serve the router `make_router` builds over fresh in-memory stores
    pub fn build(templates: TemplateCache, make_router: impl FnOnce(AppState) -> Router) -> Self {
        let snippets = Arc::new(MemorySnippets::new());
        let users = Arc::new(MemoryUsers::with_cost(4));
        let sessions = MemoryStore::default();

        let state = test_state(snippets.clone(), users.clone(), sessions.clone(), templates);
        let mut server = TestServer::new(make_router(state)).expect("test server starts");
        server.save_cookies();

        Self {
            server,
            snippets,
            users,
            sessions,
            session_token: None,
        }
    }

    /// Current session id held in the cookie jar
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Stored record for a session id, `None` once it is gone
    pub async fn session_record(&self, token: &str) -> Option<Record> {
        let id = token.parse::<Id>().ok()?;
        self.sessions
            .load(&id)
            .await
            .expect("memory store does not fail")
    }

    /// Data and expiry of the current session, for before/after comparisons
    pub async fn session_snapshot(&self) -> Option<(HashMap<String, Value>, OffsetDateTime)> {
        let token = self.session_token()?;
        self.session_record(token)
            .await
            .map(|record| (record.data, record.expiry_date))
    }

    /// Forget the session cookie
    pub fn clear_cookies(&mut self) {
        self.server.clear_cookies();
        self.session_token = None;
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let response = self.server.get(path).await;
        self.track(response)
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let response = self.server.post(path).form(fields).await;
        self.track(response)
    }

    /// Note the session id a response sets or clears
    pub fn track(&mut self, response: TestResponse) -> TestResponse {
        if let Some(cookie) = response.session_cookie() {
            if cookie.value().is_empty() {
                self.session_token = None;
            } else {
                self.session_token = Some(cookie.value().to_string());
            }
        }
        response
    }

    /// GET `page` and return the CSRF token rendered into it
    pub async fn csrf_token_from(&mut self, page: &str) -> String {
        let response = self.get(page).await;
        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::OK,
            "GET {} failed",
            page
        );
        extract_csrf_token(&response.text()).expect("page renders a CSRF token")
    }

    /// Create the standard test user directly in the store
    pub async fn create_user(&self) {
        self.users
            .insert(TEST_NAME, TEST_EMAIL, TEST_PASSWORD)
            .await
            .expect("test user is created");
    }

    /// Log in as the standard test user through the login form
    pub async fn login(&mut self) -> TestResponse {
        let token = self.csrf_token_from("/user/login").await;
        self.post_form(
            "/user/login",
            &[
                ("email", TEST_EMAIL),
                ("password", TEST_PASSWORD),
                ("csrf_token", &token),
            ],
        )
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
