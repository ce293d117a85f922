use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod repository;
pub mod service;

use crate::dispatch::Dispatcher;
use crate::dispatch::http_queue::HttpTaskQueue;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railbird_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Railbird Orchestrator...");

    let config = config::Config::from_env();

    tracing::info!("Connecting to database...");

    // Create database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Task dispatcher targeting the external queue service
    let queue = HttpTaskQueue::new(config.task_queue_url.as_str());
    let dispatcher = Dispatcher::new(
        Arc::new(queue),
        &config.segment_analyzer_url,
        config.segment_stagger_secs,
        config.hand_stagger_secs,
    );

    // Build router with all API endpoints
    let state = api::AppState {
        pool,
        dispatcher: Arc::new(dispatcher),
    };
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
