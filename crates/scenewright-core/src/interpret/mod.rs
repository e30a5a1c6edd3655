//! Response interpretation: turning raw completion text into validated
//! dialogue lines.
//!
//! Two strategies exist as configuration: lenient free-text transcript
//! parsing and strict schema-validated parsing. Single-line responses get
//! a soft tidy-up pass instead.

pub mod free_text;
pub mod line;
pub mod structured;

pub use free_text::parse_free_text;
pub use line::tidy_dialogue_line;
pub use structured::{parse_structured, scene_output_config};
