mod authentication;
mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod models;
mod views;

#[cfg(test)]
mod test_helpers;

use anyhow::Context;
pub use anyhow::Result;
use axum::{routing::*, Extension, Router};
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{net::TcpListener, sync::Arc};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

pub use config::Config;
pub use data_formats::{CreateNewsRequest, NewsResponse};
pub use db_helpers::{get_news_by_id, increment_news_views, insert_news, list_news};
pub use errors::RequestError;
pub use models::{Category, News, HOT_NEWS_THRESHOLD};

pub const LOG_TARGET: &str = "football_news::server";

/// Shared state handed to every handler through an `Extension` layer.
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

pub fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|_| anyhow::anyhow!("Failed to initialize logging"))?;
    Ok(())
}

/// Binds `config.bind_addr`, prepares the database and serves until the
/// server fails.
pub async fn run_app(config: Config) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    let db = init_db(&config.database_url).await?;
    serve_app(listener, db, config).await
}

pub async fn serve_app(listener: TcpListener, pool: SqlitePool, config: Config) -> Result<()> {
    let state = Arc::new(AppState { pool, config });
    let app = make_router().layer(Extension(state));
    let address = listener.local_addr()?;
    info!(target: LOG_TARGET, %address, "Server started");
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!(target: LOG_TARGET, %db_url, "Creating database");
        Sqlite::create_database(db_url)
            .await
            .context("Failed to create database")?;
    }
    let pool = SqlitePool::connect(db_url)
        .await
        .context("Failed to connect to database")?;
    info!(target: LOG_TARGET, "Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    info!(target: LOG_TARGET, "Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> Result<(u16, TcpListener)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not get a free port")?;
    let port = listener.local_addr()?.port();
    Ok((port, listener))
}

pub fn make_router() -> Router {
    Router::new()
        .route("/", get(show_main))
        .route("/check_health", get(alive))
        .route("/register/", get(show_register).post(register_user))
        .route("/login/", get(show_login).post(login_user))
        .route("/logout/", get(logout_user))
        .route("/create-news/", get(show_create_news).post(create_news))
        .route("/news/:id/", get(show_news))
        .route("/news/:id/edit/", get(show_edit_news).post(edit_news))
        .route("/news/:id/delete/", post(delete_news))
        .route("/json/", get(list_news_json))
        .route("/json/:id/", get(get_news_json))
        .fallback(not_found)
}
