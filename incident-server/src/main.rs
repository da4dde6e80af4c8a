use incident_server::api::api_router;
use incident_server::config::ServerConfig;
use incident_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ServerConfig::from_env();
    if std::env::args().any(|arg| arg == "--demo") {
        config.seed_demo_data = true;
    }

    let store = AppState::new();
    if config.seed_demo_data {
        store.seed_demo_data();
        info!(count = store.list().len(), "seeded demo incidents");
    }

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, ui_origin = %config.ui_origin, "incident-server listening");

    axum::serve(listener, api_router(store, config)).await
}
