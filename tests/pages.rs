mod common;

use common::{location, TestServer};

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn main_page_returns_200() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let body = driver.get_text("/").await;
    assert!(body.contains("<h1>Football News</h1>"));
    assert!(body.contains("All Articles"));
    assert!(body.contains("My Articles"));
    assert!(!body.contains("Logout"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn unknown_path_returns_404() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/burhan_always_exists/").await;
    assert_eq!(resp.status(), 404);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn health_check_is_alive() {
    let server = TestServer::start().await;
    let body = server.driver().get_text("/check_health").await;
    assert_eq!(body, "alive");
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn register_redirects_to_login_with_message() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let body = driver.get_text("/register/").await;
    assert!(body.contains("<h1>Register</h1>"));
    for field in ["username", "password1", "password2"] {
        assert!(body.contains(&format!(r#"name="{field}""#)));
    }

    let resp = driver.register("newuser").await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login/");

    let body = driver.get_text("/login/").await;
    assert!(body.contains("<h1>Login</h1>"));
    assert!(body.contains("Your account has been successfully created!"));

    let body = driver.get_text("/login/").await;
    assert!(!body.contains("Your account has been successfully created!"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn invalid_registration_rerenders_form() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver
        .post_form(
            "/register/",
            &[
                ("username", "newuser"),
                ("password1", "complexpass123"),
                ("password2", "complexpass124"),
            ],
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<h1>Register</h1>"));
    assert!(body.contains("password fields"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn duplicate_username_rerenders_form() {
    let server = TestServer::start().await;
    let driver = server.driver();

    assert_eq!(driver.register("testadmin").await.status(), 303);
    let resp = driver.register("testadmin").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("A user with that username already exists."));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn login_shows_logout_control() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let body = driver.get_text("/login/").await;
    assert!(body.contains(r#"name="username""#));
    assert!(body.contains(r#"name="password""#));

    driver.register_and_login("testadmin").await;

    let body = driver.get_text("/").await;
    assert!(body.contains("<h1>Football News</h1>"));
    assert!(body.contains("Logout"));
    assert!(body.contains("Add News"));
    assert!(body.contains("Last login: "));
    assert!(body.contains("testadmin"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn bad_credentials_rerender_login() {
    let server = TestServer::start().await;
    let driver = server.driver();
    assert_eq!(driver.register("testadmin").await.status(), 303);

    let resp = driver
        .post_form(
            "/login/",
            &[("username", "testadmin"), ("password", "wrongpassword")],
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<h1>Login</h1>"));
    assert!(body.contains("Please enter a correct username and password."));

    let body = driver.get_text("/").await;
    assert!(!body.contains("Logout"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn logout_returns_to_login() {
    let server = TestServer::start().await;
    let driver = server.driver();
    driver.register_and_login("testadmin").await;

    let resp = driver.get("/logout/").await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login/");

    let body = driver.get_text("/login/").await;
    assert!(body.contains("<h1>Login</h1>"));

    let body = driver.get_text("/").await;
    assert!(!body.contains("Logout"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn forged_token_is_anonymous() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let resp = client
        .get(server.url("/"))
        .header("cookie", "token=not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(!resp.text().await.unwrap().contains("Logout"));
}
