use flowbuilder_http_server::{run, ServerConfig, ServerError};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("FlowBuilder server starting...");

    if let Err(e) = start().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn start() -> Result<(), ServerError> {
    let config = ServerConfig::from_env().await?;
    run(config, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
