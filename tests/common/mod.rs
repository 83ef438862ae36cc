#![allow(dead_code)]

use football_news::{get_random_free_port, init_db, serve_app, Config};
use reqwest::{redirect::Policy, Response};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const PASSWORD: &str = "testpassword";

/// A live server on a random port backed by a throwaway database.
pub struct TestServer {
    pub pool: SqlitePool,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", temp_dir.path().join("news.db").display());
        let pool = init_db(&database_url)
            .await
            .expect("Failed to init database");

        let (port, listener) = get_random_free_port().expect("Failed to bind");
        let config = Config {
            database_url,
            jwt_secret: "test-secret".to_owned(),
            bind_addr: listener.local_addr().expect("Listener has an address"),
        };
        tokio::spawn(serve_app(listener, pool.clone(), config));

        Self {
            pool,
            base_url: format!("http://127.0.0.1:{port}"),
            _temp_dir: temp_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A new independent browser session.
    pub fn driver(&self) -> UiDriver {
        UiDriver::new(self.base_url.clone())
    }
}

/// HTTP client with its own cookie jar. Redirects are not followed so
/// tests can assert on them.
pub struct UiDriver {
    client: reqwest::Client,
    base_url: String,
}

impl UiDriver {
    fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to build HTTP client");
        Self { client, base_url }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn get_text(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), 200, "GET {path}");
        resp.text().await.expect("Body is text")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    pub async fn register(&self, username: &str) -> Response {
        self.post_form(
            "/register/",
            &[
                ("username", username),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
        .await
    }

    pub async fn login(&self, username: &str) -> Response {
        self.post_form("/login/", &[("username", username), ("password", PASSWORD)])
            .await
    }

    /// Registers and logs in a user, asserting both steps redirect.
    pub async fn register_and_login(&self, username: &str) {
        let resp = self.register(username).await;
        assert_eq!(resp.status(), 303);
        let resp = self.login(username).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/");
    }

    pub async fn create_news(&self, title: &str, content: &str) -> Response {
        self.post_form(
            "/create-news/",
            &[
                ("title", title),
                ("content", content),
                ("category", "match"),
                ("thumbnail", "https://example.com/image.jpg"),
                ("is_featured", "on"),
            ],
        )
        .await
    }
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("location")
        .expect("Response has a location")
        .to_str()
        .expect("Location is ascii")
}
