//! Timetable HTTP Server Binary
//!
//! Entry point for the semester timetable REST API. Loads the configuration,
//! sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin timetable-server
//!
//! # With an explicit config file
//! TIMETABLE_CONFIG=./timetable.toml cargo run --bin timetable-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `TIMETABLE_CONFIG`: Path to a `timetable.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use semester_timetable::config::AppConfig;
use semester_timetable::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting timetable HTTP server");

    let config = AppConfig::load()?;
    info!(
        "Layout: {} visible days, page {}x{} mm",
        config.week.visible_days, config.page.width_mm, config.page.height_mm
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState::new(config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
