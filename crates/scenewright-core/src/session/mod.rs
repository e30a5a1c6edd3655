//! Session domain helpers: the seeded example session and setup
//! validation.

pub mod defaults;
pub mod validate;

pub use defaults::default_session;
pub use validate::validate_setup;
