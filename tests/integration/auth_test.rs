//! Authentication integration tests
//!
//! Tests for signup, login and logout, token rotation and CSRF rejection.

mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::common::{ResponseExt, TestApp, TEST_EMAIL, TEST_PASSWORD};
    use crate::{assert_contains, assert_not_contains, assert_see_other};

    const SIGNUP_FORM: &str = "<form action='/user/signup' method='POST' novalidate>";
    const LOGIN_FORM: &str = "<form action='/user/login' method='POST' novalidate>";

    #[tokio::test]
    async fn test_signup_page_renders_form() {
        let mut app = TestApp::new();

        let response = app.get("/user/signup").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_contains!(response.text(), SIGNUP_FORM);
        assert!(response.session_cookie().is_some(), "CSRF token issues a session");
    }

    #[tokio::test]
    async fn test_signup() {
        let cases = [
            ("valid submission", "Bob", "bob@example.com", "validPa$$word", StatusCode::SEE_OTHER, None),
            ("empty name", "", "bob@example.com", "validPa$$word", StatusCode::UNPROCESSABLE_ENTITY, Some("This field cannot be blank")),
            ("empty email", "Bob", "", "validPa$$word", StatusCode::UNPROCESSABLE_ENTITY, Some("This field cannot be blank")),
            ("empty password", "Bob", "bob@example.com", "", StatusCode::UNPROCESSABLE_ENTITY, Some("This field cannot be blank")),
            ("invalid email", "Bob", "bob@example.", "validPa$$word", StatusCode::UNPROCESSABLE_ENTITY, Some("This field must be a valid email address")),
            ("short password", "Bob", "bob@example.com", "pa$$", StatusCode::UNPROCESSABLE_ENTITY, Some("This field must be at least 8 characters long")),
            ("duplicate email", "Bob", TEST_EMAIL, "validPa$$word", StatusCode::UNPROCESSABLE_ENTITY, Some("Email address is already in use")),
        ];

        for (name, user_name, email, password, status, message) in cases {
            let mut app = TestApp::new();
            app.create_user().await;
            let token = app.csrf_token_from("/user/signup").await;

            let response = app
                .post_form(
                    "/user/signup",
                    &[
                        ("name", user_name),
                        ("email", email),
                        ("password", password),
                        ("csrf_token", &token),
                    ],
                )
                .await;

            assert_eq!(response.status_code(), status, "case: {}", name);
            match message {
                Some(message) => {
                    assert_contains!(response.text(), SIGNUP_FORM);
                    assert_contains!(response.text(), message);
                    assert_eq!(app.users.count().await, 1, "case: {}", name);
                }
                None => {
                    assert_eq!(response.redirect_location().as_deref(), Some("/user/login"), "case: {}", name);
                    assert_eq!(app.users.count().await, 2, "case: {}", name);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_signup_keeps_entered_values_but_not_password() {
        let mut app = TestApp::new();
        let token = app.csrf_token_from("/user/signup").await;

        let response = app
            .post_form(
                "/user/signup",
                &[
                    ("name", "Bob"),
                    ("email", "bob@example.com"),
                    ("password", "Zq9x"),
                    ("csrf_token", &token),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_contains!(response.text(), "value='Bob'");
        assert_contains!(response.text(), "value='bob@example.com'");
        assert_not_contains!(response.text(), "Zq9x");
    }

    #[tokio::test]
    async fn test_signup_flashes_on_login_page() {
        let mut app = TestApp::new();
        let token = app.csrf_token_from("/user/signup").await;

        let response = app
            .post_form(
                "/user/signup",
                &[
                    ("name", "Bob"),
                    ("email", "bob@example.com"),
                    ("password", "validPa$$word"),
                    ("csrf_token", &token),
                ],
            )
            .await;
        assert_see_other!(response, "/user/login");

        let login = app.get("/user/login").await;
        assert_contains!(login.text(), "Your signup was successful. Please log in.");
        assert_contains!(login.text(), LOGIN_FORM);
    }

    #[tokio::test]
    async fn test_missing_csrf_token_is_rejected() {
        let mut app = TestApp::new();
        app.csrf_token_from("/user/signup").await;
        let before = app.session_snapshot().await;
        assert!(before.is_some());

        let response = app
            .post_form(
                "/user/signup",
                &[
                    ("name", "Bob"),
                    ("email", "bob@example.com"),
                    ("password", "validPa$$word"),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Bad Request");
        assert_eq!(app.users.count().await, 0);
        assert_eq!(app.session_snapshot().await, before, "session is untouched");
    }

    #[tokio::test]
    async fn test_mismatched_csrf_token_is_rejected() {
        let mut app = TestApp::new();
        app.csrf_token_from("/user/signup").await;
        let before = app.session_snapshot().await;
        assert!(before.is_some());

        let response = app
            .post_form(
                "/user/signup",
                &[
                    ("name", "Bob"),
                    ("email", "bob@example.com"),
                    ("password", "validPa$$word"),
                    ("csrf_token", "forged-token"),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(app.users.count().await, 0);
        assert_eq!(app.session_snapshot().await, before, "session is untouched");
    }

    #[tokio::test]
    async fn test_csrf_token_from_another_session_is_rejected() {
        let mut other = TestApp::new();
        let foreign = other.csrf_token_from("/user/signup").await;

        let mut app = TestApp::new();
        app.csrf_token_from("/user/signup").await;
        let before = app.session_snapshot().await;
        let foreign_before = other.session_snapshot().await;

        let response = app
            .post_form(
                "/user/signup",
                &[
                    ("name", "Bob"),
                    ("email", "bob@example.com"),
                    ("password", "validPa$$word"),
                    ("csrf_token", &foreign),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(app.users.count().await, 0);
        assert_eq!(app.session_snapshot().await, before, "session is untouched");
        assert_eq!(other.session_snapshot().await, foreign_before);
    }

    #[tokio::test]
    async fn test_login_rotates_session_token() {
        let mut app = TestApp::new();
        app.create_user().await;

        app.get("/user/login").await;
        let before = app.session_token().map(str::to_string);
        assert!(before.is_some());

        let response = app.login().await;
        assert_see_other!(response, "/snippet/create");

        let after = app.session_token().map(str::to_string);
        assert!(after.is_some());
        assert_ne!(before, after, "login issues a fresh token");

        let create = app.get("/snippet/create").await;
        assert_eq!(create.status_code(), StatusCode::OK);
        assert_contains!(create.text(), "action='/user/logout'");
    }

    #[tokio::test]
    async fn test_old_token_is_anonymous_after_login() {
        let mut app = TestApp::new();
        app.create_user().await;

        app.get("/user/login").await;
        let old = app.session_token().map(str::to_string).unwrap();
        app.login().await;

        assert!(app.session_record(&old).await.is_none(), "old session is deleted");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let mut app = TestApp::new();
        app.create_user().await;
        let token = app.csrf_token_from("/user/login").await;

        let response = app
            .post_form(
                "/user/login",
                &[
                    ("email", TEST_EMAIL),
                    ("password", "wrongPa$$word"),
                    ("csrf_token", &token),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_contains!(response.text(), "Email or password is incorrect");
        assert_contains!(response.text(), LOGIN_FORM);

        let create = app.get("/snippet/create").await;
        assert_see_other!(create, "/user/login");
    }

    #[tokio::test]
    async fn test_login_with_unknown_email() {
        let mut app = TestApp::new();
        let token = app.csrf_token_from("/user/login").await;

        let response = app
            .post_form(
                "/user/login",
                &[
                    ("email", "nobody@example.com"),
                    ("password", TEST_PASSWORD),
                    ("csrf_token", &token),
                ],
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_contains!(response.text(), "Email or password is incorrect");
    }

    #[tokio::test]
    async fn test_logout() {
        let mut app = TestApp::new();
        app.create_user().await;
        app.login().await;
        let logged_in = app.session_token().map(str::to_string);
        let token = app.csrf_token_from("/snippet/create").await;

        let response = app
            .post_form("/user/logout", &[("csrf_token", &token)])
            .await;
        assert_see_other!(response, "/");
        assert_ne!(app.session_token().map(str::to_string), logged_in);

        let home = app.get("/").await;
        assert_contains!(home.text(), "logged out successfully!");
        assert_contains!(home.text(), "href='/user/login'");

        let create = app.get("/snippet/create").await;
        assert_see_other!(create, "/user/login");
    }

    #[tokio::test]
    async fn test_logout_requires_login() {
        let mut app = TestApp::new();
        let token = app.csrf_token_from("/user/login").await;

        let response = app
            .post_form("/user/logout", &[("csrf_token", &token)])
            .await;

        assert_see_other!(response, "/user/login");
    }

    #[tokio::test]
    async fn test_deleted_user_is_treated_as_anonymous() {
        let mut app = TestApp::new();
        app.create_user().await;
        app.login().await;
        assert_eq!(app.get("/snippet/create").await.status_code(), StatusCode::OK);

        app.users.remove(1).await;

        let response = app.get("/snippet/create").await;
        assert_see_other!(response, "/user/login");
    }

    #[tokio::test]
    async fn test_forgotten_cookie_is_anonymous() {
        let mut app = TestApp::new();
        app.create_user().await;
        app.login().await;

        app.clear_cookies();

        let response = app.get("/snippet/create").await;
        assert_see_other!(response, "/user/login");
    }
}
