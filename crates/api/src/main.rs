use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskup_api::config::ServerConfig;
use taskup_api::mailer::Mailer;
use taskup_api::router::build_app_router;
use taskup_api::state::AppState;
use taskup_api::storage::FileStore;
use taskup_api::ws;
use taskup_core::verification::VerificationCodes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskup_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = taskup_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    taskup_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    taskup_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- File store ---
    let files = Arc::new(FileStore::new(config.upload_dir.clone()));
    files
        .ensure_root()
        .await
        .expect("Failed to create upload directory");

    // --- Mailer ---
    let mailer = match &config.smtp {
        Some(smtp) => Some(Arc::new(
            Mailer::new(smtp).expect("Failed to build SMTP mailer"),
        )),
        None => {
            tracing::warn!("SMTP not configured; verification emails are disabled");
            None
        }
    };

    // --- Chat rooms + heartbeat ---
    let chat_rooms = Arc::new(ws::ChatRooms::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&chat_rooms));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        chat_rooms: Arc::clone(&chat_rooms),
        verification: Arc::new(VerificationCodes::new()),
        mailer,
        files,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let count = chat_rooms.connection_count().await;
    tracing::info!(count, "Closing remaining chat connections");
    chat_rooms.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
