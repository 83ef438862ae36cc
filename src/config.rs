use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Settings read once at startup and handed to the server explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL`, `JWT_SECRET` and `BIND_ADDR` from the environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR must be a socket address like 127.0.0.1:8000")?;
        Ok(Config {
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}
