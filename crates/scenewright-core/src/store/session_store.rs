//! Key-value store trait for session persistence.
//!
//! Defines the interface the session service writes through. Values are
//! JSON-serialized `SceneSession` objects keyed by the original/mode
//! storage keys. Implementations live in scenewright-infra.

use scenewright_types::error::StoreError;

/// Trait for the key-value persistence backing session data.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Every mutating call must be immediately visible to subsequent `get`
/// calls within the same process.
pub trait SessionStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StoreError>> + Send;

    /// Set a value for a key (upsert, whole-value replace).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List all stored keys.
    fn list_keys(&self)
    -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}
