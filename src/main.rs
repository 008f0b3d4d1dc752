use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use site_insight::{
    analyzer,
    api::routes::create_router,
    config::Config,
    report,
    AppState,
};

#[derive(Parser)]
#[command(name = "site-insight", about = "Analyze a website and report page metadata, content and links.")]
struct Cli {
    /// Analyze one URL and print the report instead of starting the server
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let state = AppState::new(Arc::new(config))?;

    match cli.url {
        Some(url) => run_once(&state, &url).await,
        None => serve(state).await,
    }
}

/// One-shot mode: run the analysis directly and print the titled sections.
async fn run_once(state: &AppState, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Starting analysis for URL: {}", url);
    let site_report = analyzer::analyze_site(&state.client, url).await?;

    let data = serde_json::to_value(&site_report)?;
    match data.as_object() {
        Some(map) => print!("{}", report::format_report(map)),
        None => println!("{}", data),
    }

    Ok(())
}

async fn serve(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let server_addr = state.config.server_addr;
    let app = create_router(state);

    let listener = TcpListener::bind(server_addr).await?;
    log::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
