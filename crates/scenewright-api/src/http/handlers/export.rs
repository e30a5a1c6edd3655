//! Script export HTTP handler.
//!
//! GET /export/{mode}?stats=true&adjustments=N downloads the paginated
//! plain-text script for the session visible to that mode.

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Local;
use serde::Deserialize;

use scenewright_core::export::{ExportStats, export_filename, render_script};
use scenewright_types::session::Mode;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Include the statistics footer.
    #[serde(default)]
    pub stats: bool,
    /// Attribute-adjustment count for the statistics footer (tracked by
    /// the front end, not by the session).
    #[serde(default)]
    pub adjustments: u32,
}

/// GET /export/{mode} - Download the script document.
pub async fn export_script(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mode: Mode = mode.parse().map_err(AppError::BadRequest)?;
    let session = state.session_service.load(mode).await?;

    let stats = query.stats.then(|| ExportStats {
        edit_count: session.scene.edit_count,
        attribute_adjust_count: query.adjustments,
        generate_count: session.scene.generate_count,
    });

    let date = Local::now().format("%Y-%m-%d").to_string();
    let document = render_script(&session, stats.as_ref(), &date);

    let disposition = format!("attachment; filename=\"{}\"", export_filename(&date));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.render(),
    ))
}
