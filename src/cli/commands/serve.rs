use crate::api;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::Database;
use crate::errors::{AppError, AppResult};
use std::net::SocketAddr;
use tracing::info;

/// Run the HTTP API until Ctrl-C.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = cmd {
        let bind = bind.as_deref().unwrap_or(&cfg.bind);
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| AppError::Config(format!("invalid bind address '{}': {}", bind, e)))?;

        let db = Database::new(cfg.database_path());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async move {
            println!("poppy API listening on http://{}", addr);
            api::serve(addr, db, shutdown_signal()).await
        })?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
