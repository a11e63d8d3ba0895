use mimalloc::MiMalloc;
use sqli_lab::config::Config;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    warn!("SQL injection lab: intentionally vulnerable, for education and research only");
    info!(
        database = %cfg.database_path.display(),
        attack_log = %cfg.attack_log_path.display(),
        loglevel = %cfg.loglevel,
    );

    let state = sqli_lab::LabState::from_config(&cfg);
    state.store.init().await?;

    let app = sqli_lab::lab_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{addr}/");
    info!("vulnerable login: http://{addr}/login_vuln");
    info!("hardened login:   http://{addr}/login_safe");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
