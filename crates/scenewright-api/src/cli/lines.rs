//! Dialogue line edit commands.

use crate::cli::parse_mode;
use crate::state::AppState;

/// `swright edit <mode> <index> <text>`
pub async fn edit(
    state: &AppState,
    mode: &str,
    index: usize,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let mut session = state.session_service.load(mode).await?;

    session.scene.edit_line(index, text)?;
    state.session_service.save(mode, &session).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&session.scene.dialogue_lines[index])?
        );
    } else {
        println!("  {} line {} updated", console::style("✓").green(), index);
    }
    Ok(())
}

/// `swright delete-line <mode> <index>`
pub async fn delete(state: &AppState, mode: &str, index: usize, json: bool) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let mut session = state.session_service.load(mode).await?;

    let removed = session.scene.delete_line(index)?;
    state.session_service.save(mode, &session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&removed)?);
    } else {
        println!(
            "  {} line {} deleted ({} lines remain)",
            console::style("✓").green(),
            index,
            session.scene.dialogue_lines.len()
        );
    }
    Ok(())
}
