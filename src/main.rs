use anyhow::Context;
use courier::config::Config;
use courier::server::ServerCore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let mut server = ServerCore::new();
    server
        .start(&cfg.server)
        .with_context(|| format!("failed to start server on {}", cfg.server.listen_addr))?;

    let signals = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    signals.block_on(tokio::signal::ctrl_c())?;
    tracing::info!("Shutdown signal received");

    server.stop();

    Ok(())
}
