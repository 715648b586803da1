//! # Event Registration Bot Main Entry Point
//!
//! Initializes logging, loads configuration, wires the in-memory registration
//! state to the Telegram platform, starts the approval sweeper and runs the
//! bot next to the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_registration_bot::bot::handlers::BotHandler;
use event_registration_bot::bot::platform::{ChatPlatform, TelegramPlatform};
use event_registration_bot::config::Config;
use event_registration_bot::services::approval::ApprovalFlow;
use event_registration_bot::services::board::AnnouncementBoard;
use event_registration_bot::services::health::HealthService;
use event_registration_bot::services::registration::RegistrationService;
use event_registration_bot::services::sessions::SessionTracker;
use event_registration_bot::services::sweeper::ApprovalSweeper;
use event_registration_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_registration_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Event Registration Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Registration channel: {}, Results channel: {}, HTTP Port: {}",
        config.registration_channel_id, config.results_channel_id, config.http_port
    );

    let bot = Bot::new(&config.telegram_bot_token);
    let platform: Arc<dyn ChatPlatform> =
        Arc::new(TelegramPlatform::new(bot.clone(), config.platform_timeout()));

    let tracker = Arc::new(SessionTracker::new());
    let board = Arc::new(AnnouncementBoard::new());
    let approvals = Arc::new(ApprovalFlow::new(
        platform.clone(),
        board.clone(),
        config.registration_channel_id,
        config.results_channel_id,
        config.approval_timeout(),
    ));
    let registration = Arc::new(RegistrationService::new(
        platform,
        tracker.clone(),
        board.clone(),
        config.results_channel_id,
    ));
    let handler = BotHandler::new(approvals.clone(), registration);
    info!("Telegram bot initialized successfully");

    let mut sweeper = ApprovalSweeper::new(approvals.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create approval sweeper: {}", e))?;
    if let Err(e) = sweeper.start().await {
        tracing::error!("Failed to start approval sweeper: {}", e);
    }

    let health_service = HealthService::new(tracker, approvals, board);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .default_handler(|_| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = sweeper.stop().await {
        tracing::warn!("Error stopping approval sweeper: {}", e);
    }

    log_system_event("Application stopped", Some("in-flight registration sessions were discarded"));
    Ok(())
}
