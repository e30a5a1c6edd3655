//! Session display and lifecycle commands.

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};

use scenewright_types::error::SessionError;
use scenewright_types::session::SceneSession;

use crate::cli::parse_mode;
use crate::state::AppState;

/// Map the missing-session signal to a setup hint.
fn with_setup_hint(err: SessionError) -> anyhow::Error {
    match err {
        SessionError::Missing => {
            anyhow::anyhow!("no session data found -- run `swright setup` first")
        }
        other => other.into(),
    }
}

/// `swright show <mode>`
pub async fn show(state: &AppState, mode: &str, json: bool) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let session = state
        .session_service
        .load(mode)
        .await
        .map_err(with_setup_hint)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    print_summary(&session, &mode.to_string());
    Ok(())
}

fn print_summary(session: &SceneSession, mode: &str) {
    println!();
    println!(
        "  {} {} · {} vs {}",
        console::style("SCRIPT").bold(),
        console::style(format!("[{mode}]")).dim(),
        console::style(&session.characters.character1.name).cyan(),
        console::style(&session.characters.character2.name).magenta(),
    );
    println!();
    println!("  Scene: {}", session.scene.description);
    println!("  Plot:  {}", session.scene.plot_line);
    println!();

    if session.scene.dialogue_lines.is_empty() {
        println!("  {}", console::style("No dialogue yet.").dim());
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["#", "Speaker", "Line", "Time"]);
        for (i, line) in session.scene.dialogue_lines.iter().enumerate() {
            table.add_row(vec![
                i.to_string(),
                session.characters.name_of(line.character).to_string(),
                line.text.clone(),
                line.timestamp.clone(),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "  {}",
        console::style(format!(
            "{} lines · {} edits · {} generations · {} plot points",
            session.scene.dialogue_lines.len(),
            session.scene.edit_count,
            session.scene.generate_count,
            session.scene.plot_points.len(),
        ))
        .dim()
    );
    println!();
}

/// `swright reset <mode>`
pub async fn reset(state: &AppState, mode: &str, json: bool) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let original = state
        .session_service
        .reset_to_original(mode)
        .await
        .map_err(with_setup_hint)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&original)?);
    } else {
        println!(
            "  {} {} reset to the original session",
            console::style("✓").green(),
            mode
        );
    }
    Ok(())
}

/// `swright clear <mode>` / `swright clear --all`
pub async fn clear(
    state: &AppState,
    mode: Option<&str>,
    all: bool,
    json: bool,
) -> anyhow::Result<()> {
    match (mode, all) {
        (_, true) => {
            state.session_service.clear_all().await?;
            if json {
                println!("{}", serde_json::json!({ "cleared": "all" }));
            } else {
                println!(
                    "  {} All session data cleared -- run `swright setup` to start over",
                    console::style("✓").green()
                );
            }
        }
        (Some(mode_str), false) => {
            let mode = parse_mode(mode_str)?;
            state.session_service.clear_mode(mode).await?;
            if json {
                println!("{}", serde_json::json!({ "cleared": mode.to_string() }));
            } else {
                println!("  {} {} session copy cleared", console::style("✓").green(), mode);
            }
        }
        (None, false) => anyhow::bail!("specify a mode to clear, or --all"),
    }
    Ok(())
}
