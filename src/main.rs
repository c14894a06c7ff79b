// main.rs
use std::sync::Arc;

use poem::listener::TcpListener;
use poem_blog::api::{self, AppState};
use poem_blog::config::Config;
use poem_blog::store::Store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let store = Store::new(config.store());
    store.migrate().await?;
    let state = Arc::new(AppState { store });

    tracing::info!(addr = %config.bind_addr, "serving blog api");
    poem::Server::new(TcpListener::bind(config.bind_addr.clone()))
        .run(api::app(state))
        .await?;
    Ok(())
}
