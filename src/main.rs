use mimalloc::MiMalloc;
use profiler_relay::{
    Config, Dispatcher, Providers, RelayState, ServiceAccountBroker, relay_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Sibling `.env.local` first so a shared frontend env file wins over a local `.env`.
    dotenvy::from_filename("../.env.local").ok();
    dotenvy::dotenv().ok();

    let cfg = Arc::new(Config::load()?);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        project_id = %cfg.storage.project_id,
        bucket_name = %cfg.storage.bucket_name,
        credentials_path = %cfg.storage.credentials_path.display(),
        "Relay config (effective)"
    );

    let providers = Providers::from_config(&cfg);
    let dispatcher = Dispatcher::new(providers);
    let token_broker = Arc::new(ServiceAccountBroker::from_config(
        &cfg.storage,
        &cfg.providers.defaults,
    ));

    let state = RelayState::new(cfg.clone(), dispatcher, token_broker);
    let app = relay_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
        () = ctrl_c => {},
        () = terminate => {},
    }
}
