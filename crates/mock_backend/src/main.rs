use std::net::SocketAddr;

use mock_backend::{build_router, config::load_settings, MockBackendState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings()?;
    let app = build_router(MockBackendState::new(settings.predictions));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "mock prediction backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
