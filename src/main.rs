use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use route_relay::config::Config;
use route_relay::engine::Engine;
use route_relay::error::Error;
use route_relay::server::serve;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "relay stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let engine = Engine::new(&config)?;

    serve(engine, config.addr).await
}
