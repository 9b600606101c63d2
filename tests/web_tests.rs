//! End-to-end tests for the HTML routes, following redirects the way a
//! browser would and carrying the session cookie between requests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use tower::ServiceExt;
use tower_sessions::ExpiredDeletion;
use watchlist::config::Config;
use watchlist::models::movie::MovieInput;
use watchlist::web::AppState;

struct Page {
    status: StatusCode,
    body: String,
}

impl Page {
    fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

struct TestClient {
    state: Arc<AppState>,
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    async fn get(&mut self, uri: &str) -> Page {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn login(&mut self) -> Page {
        self.post(
            "/login",
            &[("username", "testusername"), ("password", "testpassword")],
        )
        .await
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<String>) -> Page {
        let mut method = method;
        let mut uri = uri.to_string();
        let mut body = body;

        loop {
            let mut builder = Request::builder().method(method.clone()).uri(&uri);
            if let Some(cookie) = &self.cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let request_body = match &body {
                Some(form) => {
                    builder =
                        builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                    Body::from(form.clone())
                }
                None => Body::empty(),
            };

            let response = self
                .router
                .clone()
                .oneshot(builder.body(request_body).unwrap())
                .await
                .unwrap();

            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }

            if response.status().is_redirection() {
                uri = response.headers()[header::LOCATION]
                    .to_str()
                    .unwrap()
                    .to_string();
                method = Method::GET;
                body = None;
                continue;
            }

            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            return Page {
                status,
                body: String::from_utf8(bytes.to_vec()).unwrap(),
            };
        }
    }
}

async fn spawn_app() -> TestClient {
    spawn_app_with(|_| {}).await
}

async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestClient {
    let db_path =
        std::env::temp_dir().join(format!("watchlist-web-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    configure(&mut config);

    let state = watchlist::web::create_app_state_from_config(config.clone())
        .await
        .expect("failed to create app state");

    state
        .store()
        .create_user("TestName", "testusername", "testpassword", &config.security)
        .await
        .expect("seed user");
    state
        .store()
        .add_movie(&MovieInput::parse("Test Movie Title", "2019").unwrap())
        .await
        .expect("seed movie");

    let router = watchlist::web::router(state.clone());
    TestClient {
        state,
        router,
        cookie: None,
    }
}

fn assert_no_privileged_ui(page: &Page) {
    for word in ["Logout", "Edit", "Add", "Delete", "Settings", "<form method=\"post\">"] {
        assert!(!page.contains(word), "unexpected {word:?} in guest page");
    }
}

#[tokio::test]
async fn test_404_page() {
    let mut client = spawn_app().await;

    let page = client.get("/nothing").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.contains("Page Not Found - 404"));
    assert!(page.contains("Go Back"));
}

#[tokio::test]
async fn test_index_page() {
    let mut client = spawn_app().await;

    let page = client.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("TestName's Watchlist"));
    assert!(page.contains("Test Movie Title"));

    let page = client.get("/index").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Test Movie Title"));
}

#[tokio::test]
async fn test_user_page() {
    let mut client = spawn_app().await;

    let page = client.get("/user/XAY").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body, "User : XAY");
}

#[tokio::test]
async fn test_static_stylesheet() {
    let response = spawn_app()
        .await
        .router
        .oneshot(
            Request::builder()
                .uri("/static/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
}

#[tokio::test]
async fn test_create_item() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client
        .post("/", &[("title", "New movie"), ("year", "2020")])
        .await;
    assert!(page.contains("Item created."));
    assert!(page.contains("New movie"));

    let page = client.post("/", &[("title", ""), ("year", "2020")]).await;
    assert!(!page.contains("Item created."));
    assert!(page.contains("Invalid input"));

    let page = client
        .post("/", &[("title", "New movie"), ("year", "")])
        .await;
    assert!(!page.contains("Item created."));
    assert!(page.contains("Invalid input"));

    let page = client.post("/", &[("year", "2020")]).await;
    assert!(page.contains("Invalid input"));

    assert_eq!(client.state.store().count_movies().await.unwrap(), 2);
}

#[tokio::test]
async fn test_guest_cannot_create_item() {
    let mut client = spawn_app().await;

    let page = client
        .post("/", &[("title", "Sneaky"), ("year", "2020")])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.contains("Sneaky"));
    assert!(!page.contains("Item created."));
    assert_eq!(client.state.store().count_movies().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_item() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client.get("/movie/edit/1").await;
    assert!(page.contains("Edit item"));
    assert!(page.contains("Test Movie Title"));
    assert!(page.contains("2019"));
    assert!(page.contains("Logout"));

    let page = client
        .post(
            "/movie/edit/1",
            &[("title", "New Movie Edited"), ("year", "2020")],
        )
        .await;
    assert!(page.contains("Item updated."));
    assert!(page.contains("New Movie Edited"));

    let page = client
        .post("/movie/edit/1", &[("title", ""), ("year", "2020")])
        .await;
    assert!(!page.contains("Item updated."));
    assert!(page.contains("Invalid input"));
    assert!(page.contains("Edit item"));

    let page = client
        .post("/movie/edit/1", &[("title", "New Movie Edited"), ("year", "")])
        .await;
    assert!(!page.contains("Item updated."));
    assert!(page.contains("Invalid input"));

    let movie = client.state.store().get_movie(1).await.unwrap().unwrap();
    assert_eq!(movie.title, "New Movie Edited");
    assert_eq!(movie.year, "2020");
}

#[tokio::test]
async fn test_edit_unknown_movie_is_not_found() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client.get("/movie/edit/999").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.contains("Page Not Found - 404"));

    let page = client.get("/movie/edit/abc").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = client
        .post("/movie/edit/999", &[("title", "X"), ("year", "2000")])
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = client.post("/movie/delete/999", &[]).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_item() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client.post("/movie/delete/1", &[]).await;
    assert!(page.contains("Item deleted."));
    assert!(!page.contains("Test Movie Title"));
    assert_eq!(client.state.store().count_movies().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_protect() {
    let mut client = spawn_app().await;

    let page = client.get("/").await;
    assert_no_privileged_ui(&page);
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let mut client = spawn_app().await;

    for uri in ["/settings", "/movie/edit/1", "/logout"] {
        let page = client.get(uri).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.contains("<h3>Login</h3>"), "{uri} did not redirect");
        assert!(page.contains("Please log in to access this page."));
    }

    let page = client.post("/movie/delete/1", &[]).await;
    assert!(page.contains("<h3>Login</h3>"));
    assert_eq!(client.state.store().count_movies().await.unwrap(), 1);

    let page = client.post("/settings", &[("name", "Hacker")]).await;
    assert!(page.contains("<h3>Login</h3>"));
    assert!(!page.contains("Hacker"));
}

#[tokio::test]
async fn test_login() {
    let mut client = spawn_app().await;

    let page = client.login().await;
    assert!(page.contains("Login success."));
    assert!(page.contains("Logout"));
    assert!(page.contains("Edit"));
    assert!(page.contains("Add"));
    assert!(page.contains("Delete"));
    assert!(page.contains("Settings"));
    assert!(page.contains("<form method=\"post\">"));

    let page = client
        .post(
            "/login",
            &[("username", "testusername"), ("password", "wrongpassword")],
        )
        .await;
    assert!(!page.contains("Login success."));
    assert!(page.contains("Invalid username or password"));

    let page = client
        .post(
            "/login",
            &[("username", "wrongusername"), ("password", "wrongpassword")],
        )
        .await;
    assert!(!page.contains("Login success."));
    assert!(page.contains("Invalid username or password"));

    let page = client
        .post("/login", &[("username", ""), ("password", "wrongpassword")])
        .await;
    assert!(!page.contains("Login success."));
    assert!(page.contains("Invalid input"));

    let page = client
        .post("/login", &[("username", "testusername"), ("password", "")])
        .await;
    assert!(!page.contains("Login success."));
    assert!(page.contains("Invalid input"));
}

#[tokio::test]
async fn test_logout() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client.get("/logout").await;
    assert!(page.contains("Goodbye."));
    assert_no_privileged_ui(&page);

    let page = client.get("/settings").await;
    assert!(page.contains("<h3>Login</h3>"));
}

#[tokio::test]
async fn test_settings() {
    let mut client = spawn_app().await;
    client.login().await;

    let page = client.get("/settings").await;
    assert!(page.contains("Settings"));
    assert!(page.contains("Your Name"));
    assert!(page.contains("value=\"TestName\""));
    assert!(page.contains("Logout"));

    let page = client.post("/settings", &[("name", "XAY")]).await;
    assert!(page.contains("Settings updated."));
    assert!(page.contains("XAY's Watchlist"));

    let page = client.post("/settings", &[("name", "")]).await;
    assert!(!page.contains("Settings updated."));
    assert!(page.contains("Invalid input"));

    let user = client.state.store().first_user().await.unwrap().unwrap();
    assert_eq!(user.name, "XAY");
}

async fn stored_sessions(state: &AppState) -> i64 {
    let row = state
        .store()
        .conn
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM tower_sessions".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn test_sessions_are_stored_in_database() {
    let mut client = spawn_app().await;
    assert_eq!(stored_sessions(&client.state).await, 0);

    client.login().await;
    assert_eq!(stored_sessions(&client.state).await, 1);
}

#[tokio::test]
async fn test_expired_sessions_are_deleted() {
    let mut client = spawn_app_with(|config| config.server.session_ttl_minutes = 0).await;

    // A guest hitting a protected route gets a session holding the login flash.
    client.get("/settings").await;
    assert!(stored_sessions(&client.state).await >= 1);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    client.state.sessions.delete_expired().await.unwrap();
    assert_eq!(stored_sessions(&client.state).await, 0);
}
