//! Laundry Cat - a state-managed HTTP server that reminds you to take
//! your laundry out of the machine
//!
//! This is the main entry point for the laundry-cat application.

use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use laundry_cat::{
    api::create_router,
    config::Config,
    services::{check_notify_available, DesktopNotifier, Notifier},
    state::AppState,
    tasks::{coordinator_task, countdown_task},
    utils::shutdown_signal,
    worker::reminder_worker_task,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "laundry_cat={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting laundry-cat server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, reminder interval={}s",
        config.host, config.port, config.reminder_interval
    );

    // Missing notify-send is not fatal; reminders silently degrade
    check_notify_available().await;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the reminder worker and register its message channel. The
    // worker only ever hears from us through this channel.
    let (worker_tx, worker_rx) = mpsc::channel(16);
    let notifier: Arc<dyn Notifier> = Arc::new(DesktopNotifier);
    let cadence = Duration::from_secs(config.reminder_interval);
    tokio::spawn(reminder_worker_task(worker_rx, notifier, cadence));
    state.register_worker(worker_tx);

    // Start the countdown tick driver and the coordinator
    tokio::spawn(countdown_task(Arc::clone(&state)));
    tokio::spawn(coordinator_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/set    - Set countdown from minutes/seconds");
    info!("  POST /timer/dial   - Set countdown from a rotary dial value");
    info!("  POST /timer/start  - Start the countdown");
    info!("  POST /timer/pause  - Pause the countdown");
    info!("  POST /timer/resume - Resume the countdown");
    info!("  POST /timer/reset  - Reset to the configured duration");
    info!("  POST /timer/new    - Discard and set a new timer");
    info!("  POST /respond      - Acknowledge finished laundry");
    info!("  POST /notify/test  - Fire a test notification");
    info!("  GET  /status       - Check current status and timer");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
