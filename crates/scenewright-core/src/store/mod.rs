//! Session persistence: the `SessionStore` port and the `SessionService`
//! that implements the mode fork/fallback/reset contract over it.

pub mod service;
pub mod session_store;

pub use service::SessionService;
pub use session_store::SessionStore;
