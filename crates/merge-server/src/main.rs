mod app;
mod args;
mod assets;
mod routes;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use merge_core::rules::Rules;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::AppState;
use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rules = match &args.config {
        Some(path) => Rules::from_toml(path)?,
        None => Rules::default(),
    };
    info!(
        size = rules.size,
        target = rules.target,
        initial_tiles = rules.initial_tiles,
        "game rules loaded"
    );

    let state = AppState::new(rules, args.seed);
    let router = Router::new()
        .route("/api/game", get(routes::get_game))
        .route("/api/move", post(routes::post_move))
        .route("/api/new", post(routes::new_game))
        .route("/api/health", get(routes::health))
        .route("/", get(assets::index))
        .route("/style.css", get(assets::stylesheet))
        .route("/renderer.js", get(assets::renderer))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid host/port combination")?;
    info!("listening" = %addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
