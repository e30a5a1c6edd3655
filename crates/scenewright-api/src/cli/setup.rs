//! Interactive setup form.
//!
//! Collects both characters and the scene through dialoguer prompts
//! seeded with the example session, validates, and saves the result as
//! the original session. `--file` skips the prompts and reads a JSON
//! session instead.

use std::path::Path;

use dialoguer::Input;

use scenewright_core::session::{default_session, validate_setup};
use scenewright_types::session::SceneSession;

use crate::state::AppState;

/// `swright setup [--file session.json]`
pub async fn setup(state: &AppState, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let session = match file {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            serde_json::from_str::<SceneSession>(&content)?
        }
        None => prompt_session()?,
    };

    if let Err(err) = validate_setup(&session) {
        for field in &err.0 {
            eprintln!(
                "  {} {}: {}",
                console::style("✗").red(),
                field.field,
                field.message
            );
        }
        anyhow::bail!("{err}");
    }

    state.session_service.save_original(&session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!();
        println!(
            "  {} Session saved for {} and {}",
            console::style("✓").green(),
            console::style(&session.characters.character1.name).cyan(),
            console::style(&session.characters.character2.name).cyan(),
        );
        println!(
            "  {}",
            console::style("Generate with `swright line finegrain character1` or `swright scene normal`").dim()
        );
        println!();
    }

    Ok(())
}

/// Walk through the setup form, seeded with the example session.
fn prompt_session() -> anyhow::Result<SceneSession> {
    let mut session = default_session();

    println!();
    println!("  {}", console::style("Set up your characters").bold());
    println!();

    session.characters.character1.name = Input::new()
        .with_prompt("Character 1 name")
        .default(session.characters.character1.name.clone())
        .interact_text()?;
    session.characters.character1.description = Input::new()
        .with_prompt("Character 1 description")
        .default(session.characters.character1.description.clone())
        .interact_text()?;

    session.characters.character2.name = Input::new()
        .with_prompt("Character 2 name")
        .default(session.characters.character2.name.clone())
        .interact_text()?;
    session.characters.character2.description = Input::new()
        .with_prompt("Character 2 description")
        .default(session.characters.character2.description.clone())
        .interact_text()?;

    session.scene.description = Input::new()
        .with_prompt("Scene description")
        .default(session.scene.description.clone())
        .interact_text()?;
    session.scene.plot_line = Input::new()
        .with_prompt("Initial plot development")
        .default(session.scene.plot_line.clone())
        .interact_text()?;

    Ok(session)
}
