//! Generation commands: single lines and scene batches.
//!
//! Both commands compose load -> generate -> append -> save, so a
//! successful generation is immediately persisted to the mode's session
//! copy.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use scenewright_types::generation::{DialogueGenerationRequest, SceneGenerationRequest};
use scenewright_types::scene::Speaker;

use crate::cli::parse_mode;
use crate::state::AppState;

fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("  {spinner} {msg}")
            .expect("valid spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// `swright line <mode> <character1|character2>`
pub async fn line(
    state: &AppState,
    mode: &str,
    speaker: &str,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let slot: Speaker = speaker
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e} (expected 'character1' or 'character2')"))?;

    let service = state.generation()?.clone();
    let mut session = state.session_service.load(mode).await?;

    let request = DialogueGenerationRequest {
        speaking_character: session.characters.get(slot).clone(),
        other_character: session.characters.get(slot.other()).clone(),
        speaking_slot: Some(slot),
        scene_description: session.scene.description.clone(),
        plot_line: session.scene.plot_line.clone(),
        response_length: None,
        dialogue_history: service
            .history_window(&session.scene.dialogue_lines)
            .to_vec(),
    };

    let bar = spinner("Writing...", quiet);
    let result = service.generate_line(&mode.to_string(), &request).await;
    bar.finish_and_clear();
    let dialogue_line = result?;

    session.scene.append_generated(dialogue_line.clone());
    state.session_service.save(mode, &session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dialogue_line)?);
    } else {
        println!();
        println!(
            "  {}",
            console::style(session.characters.name_of(slot).to_uppercase()).bold()
        );
        println!("  {}", dialogue_line.text);
        println!();
    }
    Ok(())
}

/// `swright scene <mode> [--parse free-text|structured]`
pub async fn scene(
    state: &AppState,
    mode: &str,
    parse: Option<&str>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mode = parse_mode(mode)?;
    let parse_mode_override = parse
        .map(|p| {
            p.parse()
                .map_err(|e: String| anyhow::anyhow!("{e} (expected 'free-text' or 'structured')"))
        })
        .transpose()?;

    let service = state.generation()?.clone();
    let mut session = state.session_service.load(mode).await?;

    let request = SceneGenerationRequest {
        characters: session.characters.clone(),
        scene_description: session.scene.description.clone(),
        plot_point: session.scene.plot_line.clone(),
        previous_dialogue: service
            .history_window(&session.scene.dialogue_lines)
            .to_vec(),
        previous_plot_point: session.scene.plot_points.last().cloned(),
        parse_mode: parse_mode_override,
    };

    let bar = spinner("Writing scene...", quiet);
    let result = service.generate_scene(&mode.to_string(), &request).await;
    bar.finish_and_clear();
    let lines = result?;

    session.scene.append_generated_batch(lines.clone());
    state.session_service.save(mode, &session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        println!();
        for line in &lines {
            println!(
                "  {}",
                console::style(session.characters.name_of(line.character).to_uppercase()).bold()
            );
            println!("  {}", line.text);
            println!();
        }
        println!(
            "  {}",
            console::style(format!("{} lines added", lines.len())).dim()
        );
        println!();
    }
    Ok(())
}
