use football_news::{init_logging, run_app, Config, LOG_TARGET};
use tracing::error;

#[tokio::main]
async fn main() -> football_news::Result<()> {
    dotenvy::dotenv().ok();
    init_logging()?;
    let config = Config::from_env()?;
    if let Err(error) = run_app(config).await {
        error!(target: LOG_TARGET, %error, "Server stopped");
        return Err(error);
    }
    Ok(())
}
