//! Scenewright CLI and REST API entry point.
//!
//! Binary name: `swright`
//!
//! Parses CLI arguments, initializes the data directory, config, database
//! and services, then dispatches to the appropriate command handler or
//! starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity (RUST_LOG wins when set).
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,scenewright=debug",
        _ => "trace",
    };
    scenewright_observe::tracing_setup::init_tracing_with_filter(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "swright", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (data dir, config, DB, services)
    let state = AppState::init().await?;

    let result = run(&cli, state).await;
    scenewright_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: &Cli, state: AppState) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Setup { file } => {
            cli::setup::setup(&state, file.as_deref(), cli.json).await?;
        }

        Commands::Show { mode } => {
            cli::session::show(&state, mode, cli.json).await?;
        }

        Commands::Line { mode, speaker } => {
            cli::generate::line(&state, mode, speaker, cli.json, cli.quiet).await?;
        }

        Commands::Scene { mode, parse } => {
            cli::generate::scene(&state, mode, parse.as_deref(), cli.json, cli.quiet).await?;
        }

        Commands::Edit { mode, index, text } => {
            cli::lines::edit(&state, mode, *index, text, cli.json).await?;
        }

        Commands::DeleteLine { mode, index } => {
            cli::lines::delete(&state, mode, *index, cli.json).await?;
        }

        Commands::Export { mode, stats, output } => {
            cli::export::export(&state, mode, *stats, output.clone(), cli.json).await?;
        }

        Commands::Reset { mode } => {
            cli::session::reset(&state, mode, cli.json).await?;
        }

        Commands::Clear { mode, all } => {
            cli::session::clear(&state, mode.as_deref(), *all, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            if state.generation_service.is_none() {
                println!(
                    "  {} No {} set -- the generation endpoints will return errors",
                    console::style("!").yellow(),
                    state.config.provider.api_key_env
                );
            }

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Scenewright API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
