//! FlakeRank Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flakerank_engine::api;
use flakerank_engine::infrastructure::{
    app_settings::AppSettings, chat_rest::ChatRestClient, clock::SystemClock,
    ranking_api::RankingApiClient,
};
use flakerank_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flakerank_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FlakeRank Engine");

    let settings = AppSettings::from_env()?;
    tracing::info!(
        endpoint = %settings.flake_endpoint,
        chat_api_url = %settings.chat_api_url,
        session_timeout_secs = settings.session_timeout.as_secs(),
        "Configuration loaded"
    );

    // Create infrastructure clients
    let ranking = Arc::new(RankingApiClient::new(&settings.flake_endpoint, settings.http_timeout));
    let messaging = Arc::new(ChatRestClient::new(
        &settings.chat_api_url,
        settings.bot_token.clone(),
        settings.http_timeout,
    ));
    let clock = Arc::new(SystemClock::new());

    // Create application
    let app = Arc::new(App::new(ranking, messaging, clock, settings.session_timeout));

    // Spawn expiry sweeper
    let sweep_app = app.clone();
    let sweep_interval = settings.sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let evicted = sweep_app.use_cases.components.expire.execute().await;
            if evicted > 0 {
                tracing::debug!(evicted, "Expiry sweep finished");
            }
        }
    });

    let router = api::http::routes()
        .with_state(app.clone())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", settings.server_host, settings.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let closed = app.registry.close_all().await;
    tracing::info!(closed, "FlakeRank Engine stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
