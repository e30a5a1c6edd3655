//! Script export command.

use std::path::PathBuf;

use chrono::Local;

use scenewright_core::export::{ExportStats, export_filename, render_script};

use crate::cli::parse_mode;
use crate::state::AppState;

/// `swright export <mode> [--stats] [-o FILE]`
pub async fn export(
    state: &AppState,
    mode: &str,
    stats: bool,
    output: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let session = state.session_service.load(mode).await?;

    let export_stats = stats.then(|| ExportStats {
        edit_count: session.scene.edit_count,
        attribute_adjust_count: 0,
        generate_count: session.scene.generate_count,
    });

    let date = Local::now().format("%Y-%m-%d").to_string();
    let document = render_script(&session, export_stats.as_ref(), &date);

    let path = output.unwrap_or_else(|| PathBuf::from(export_filename(&date)));
    tokio::fs::write(&path, document.render()).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "path": path.display().to_string(),
                "pages": document.page_count(),
            })
        );
    } else {
        println!(
            "  {} Script written to {} ({} page{})",
            console::style("✓").green(),
            console::style(path.display()).cyan(),
            document.page_count(),
            if document.page_count() == 1 { "" } else { "s" },
        );
    }
    Ok(())
}
