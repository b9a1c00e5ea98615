use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poopyrus_api::config::{IdentityConfig, ServerConfig, StoreConfig};
use poopyrus_api::identity::{FirebaseIdentity, SharedIdentity, StaticIdentity};
use poopyrus_api::router::build_app_router;
use poopyrus_api::state::AppState;
use poopyrus_db::{MemoryStore, SharedStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "poopyrus_api=debug,poopyrus_db=debug,tower_http=debug".into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Document store ---
    let store: SharedStore = match &config.store {
        StoreConfig::Mongo { uri, database } => {
            let store = poopyrus_db::connect(uri, database)
                .await
                .expect("Failed to create MongoDB client");
            tracing::info!(database = %database, "MongoDB client created");
            store
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    poopyrus_db::health_check(store.as_ref())
        .await
        .expect("Document store health check failed");
    tracing::info!("Document store health check passed");

    // --- Identity provider ---
    let identity: SharedIdentity = match &config.identity {
        IdentityConfig::Firebase(firebase) => Arc::new(
            FirebaseIdentity::new(firebase.clone()).expect("Failed to build identity HTTP client"),
        ),
        IdentityConfig::Static(static_config) => {
            tracing::warn!("Using static identity provider");
            Arc::new(StaticIdentity::from_config(static_config))
        }
    };

    // --- App state ---
    let state = AppState { store, identity };

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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
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
