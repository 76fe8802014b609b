use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use standup_timer::{
    console, create_router, AppState, Config, Lineups, MeetingSession, SystemClock, ViewKind,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "standup-timer", version, about = "Meeting facilitation timer")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, default_value = "config/standup-timer")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API for both views
    Serve,
    /// Facilitate one view from the terminal
    Run {
        #[arg(long, value_enum, default_value_t = ViewKind::Teams)]
        view: ViewKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Standup Timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Allocation: {}s total, {}s buffer",
        cfg.allocation.total_secs, cfg.allocation.buffer_secs
    );

    let lineups = Lineups::load(&cfg)?;
    let session_config = cfg.session_config()?;

    match cli.command {
        Command::Serve => {
            let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
            let state = AppState::new(lineups, session_config, Arc::new(SystemClock));
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            info!("HTTP server listening on {}", addr);
            axum::serve(listener, app).await.context("HTTP server failed")?;
        }
        Command::Run { view } => {
            info!("Facilitating {} view", view);
            let session =
                MeetingSession::new(session_config, lineups.get(view).clone(), Arc::new(SystemClock));
            console::run(&session).await?;
        }
    }

    Ok(())
}
