//! Middleware chain integration tests
//!
//! Tests for security headers, panic recovery, render failures and the
//! CSRF header path.

mod tests {
    use axum::{
        http::{HeaderValue, StatusCode},
        routing::get,
        Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower_sessions::cookie::SameSite;

    use snipbox::backend::auth::FLASH_KEY;
    use snipbox::backend::csrf::CSRF_HEADER;
    use snipbox::backend::middleware::headers::CSP;
    use snipbox::backend::middleware::install_panic_hook;
    use snipbox::backend::routes::chain;
    use snipbox::backend::session::Session;
    use snipbox::backend::snippets::handlers::home;
    use snipbox::backend::templates::{TemplateCache, TemplateSources};

    use crate::common::{template_dir, ResponseExt, TestApp};
    use crate::{assert_contains, assert_not_contains, assert_ok, assert_see_other};

    async fn flash_then_panic(session: Session) -> &'static str {
        session
            .insert(FLASH_KEY, "Saved before the crash")
            .await
            .unwrap();
        panic!("handler exploded");
    }

    fn panicking_app() -> TestApp {
        let templates = assert_ok!(TemplateCache::from_dir(template_dir()));
        TestApp::build(templates, |state| {
            let routes = chain::dynamic(
                Router::new()
                    .route("/", get(home))
                    .route("/boom", get(flash_then_panic)),
                &state,
            );
            chain::standard(routes.with_state(state.clone()), &state)
        })
    }

    #[tokio::test]
    async fn test_secure_headers_on_pages() {
        let mut app = TestApp::new();

        let response = app.get("/").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.header_str("content-security-policy").as_deref(), Some(CSP));
        assert_eq!(response.header_str("referrer-policy").as_deref(), Some("origin-when-cross-origin"));
        assert_eq!(response.header_str("x-content-type-options").as_deref(), Some("nosniff"));
        assert_eq!(response.header_str("x-frame-options").as_deref(), Some("deny"));
        assert_eq!(response.header_str("x-xss-protection").as_deref(), Some("0"));
        assert_eq!(response.header_str("vary").as_deref(), Some("Cookie"));
    }

    #[tokio::test]
    async fn test_session_cookie_attributes() {
        let mut app = TestApp::new();

        let response = app.get("/user/login").await;
        let cookie = response.session_cookie().expect("session cookie is set");

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[tokio::test]
    async fn test_panic_is_recovered_after_session_save() {
        install_panic_hook();
        let mut app = panicking_app();
        app.get("/").await;
        let token = app.session_token().map(str::to_string).expect("session started");

        let response = app.get("/boom").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Internal Server Error");
        assert_eq!(response.header_str("connection").as_deref(), Some("close"));
        assert_eq!(response.header_str("x-frame-options").as_deref(), Some("deny"));
        assert_eq!(response.header_str("content-security-policy").as_deref(), Some(CSP));

        let record = app.session_record(&token).await.expect("session survives");
        assert_eq!(
            record.data.get(FLASH_KEY),
            Some(&json!("Saved before the crash")),
            "flash written before the panic is saved"
        );

        let home = app.get("/").await;
        assert_contains!(home.text(), "Saved before the crash");
    }

    #[tokio::test]
    async fn test_server_keeps_serving_after_panic() {
        let mut app = panicking_app();

        let boom = app.get("/boom").await;
        assert_eq!(boom.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = app.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_contains!(response.text(), "Latest Snippets");
    }

    #[tokio::test]
    async fn test_render_failure_is_a_clean_500() {
        let sources = TemplateSources {
            base: r#"<html>{{> main}}</html>"#.to_string(),
            partials: Vec::new(),
            pages: vec![
                (
                    "home".to_string(),
                    r#"{{#> base}}{{#*inline "main"}}<p>partial</p>{{human_date "yesterday"}}{{/inline}}{{/base}}"#
                        .to_string(),
                ),
                (
                    "not_found".to_string(),
                    r#"{{#> base}}{{#*inline "main"}}Page not found{{/inline}}{{/base}}"#.to_string(),
                ),
            ],
        };
        let templates = assert_ok!(TemplateCache::from_sources(sources));
        let mut app = TestApp::with_templates(templates);

        let response = app.get("/").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Internal Server Error");
        assert_not_contains!(response.text(), "<p>partial</p>");
    }

    #[tokio::test]
    async fn test_csrf_token_accepted_from_header() {
        let mut app = TestApp::new();
        app.create_user().await;
        app.login().await;
        let token = app.csrf_token_from("/snippet/create").await;

        let response = app
            .server
            .post("/user/logout")
            .add_header(CSRF_HEADER, assert_ok!(HeaderValue::from_str(&token)))
            .await;
        let response = app.track(response);

        assert_see_other!(response, "/");
    }

    #[tokio::test]
    async fn test_non_form_post_binds_empty_form() {
        let mut app = TestApp::new();
        let token = app.csrf_token_from("/user/signup").await;

        let response = app
            .server
            .post("/user/signup")
            .add_header(CSRF_HEADER, assert_ok!(HeaderValue::from_str(&token)))
            .json(&json!({ "name": "Bob" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_contains!(response.text(), "This field cannot be blank");
        assert_eq!(app.users.count().await, 0);
    }
}
