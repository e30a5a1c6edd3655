//! Script export: read-only rendering of a session into a paginated
//! fixed-width document.

pub mod script;

pub use script::{ExportStats, ScriptDocument, export_filename, render_script};
