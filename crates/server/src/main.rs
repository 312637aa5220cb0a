mod api;
mod catalog;
mod export;
mod jobs;
mod router;
mod state;

use tracing::info;

use leadmap_core::Config;

async fn serve(config: &Config) -> anyhow::Result<()> {
    config.log_summary();

    let state = state::build_app_state(config);
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    leadmap_core::config::load_dotenv();
    let config = Config::from_env();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("serve") | None => serve(&config).await?,
        _ => {
            println!("leadmap v{}", env!("CARGO_PKG_VERSION"));
            println!("Usage: leadmap-server [command]");
            println!("  serve    Start the scraping API server (default)");
        }
    }

    Ok(())
}
