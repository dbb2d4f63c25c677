use anyhow::Result;
use tracing_subscriber::EnvFilter;

use btc_notify::application::monitor::Monitor;
use btc_notify::shared::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let monitor = Monitor::new(&config);

    // A failed run logs and best-effort notifies, but never fails the
    // scheduler: the next invocation is independent.
    monitor.run().await;
    Ok(())
}
