//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `scenewright-core` using sqlx with
//! split read/write pools. Values are stored as JSON text and
//! deserialized on read; a write is visible to every subsequent read as
//! soon as the call returns.

use chrono::Utc;
use sqlx::Row;

use scenewright_core::store::SessionStore;
use scenewright_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new session store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl SessionStore for SqliteSessionStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query("SELECT value FROM session_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| StoreError::Query(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| StoreError::Query(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO session_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM session_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT key FROM session_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_core::session::default_session;
    use scenewright_core::store::SessionService;
    use scenewright_types::session::Mode;

    async fn test_store() -> SqliteSessionStore {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        SqliteSessionStore::new(DatabasePool::new(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = test_store().await;

        let value = serde_json::json!({"scene": {"description": "a room"}});
        store.set("originalSessionData", &value).await.unwrap();

        let got = store.get("originalSessionData").await.unwrap();
        assert_eq!(got, Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = test_store().await;
        let got = store.get("missing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let store = test_store().await;

        store
            .set("normalSessionData", &serde_json::json!(1))
            .await
            .unwrap();
        store
            .set("normalSessionData", &serde_json::json!(2))
            .await
            .unwrap();

        let got = store.get("normalSessionData").await.unwrap();
        assert_eq!(got, Some(serde_json::json!(2)));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let store = test_store().await;
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_immediately_visible() {
        let store = test_store().await;

        store
            .set("finegrainSessionData", &serde_json::json!({"v": 1}))
            .await
            .unwrap();
        assert!(store.get("finegrainSessionData").await.unwrap().is_some());

        store.delete("finegrainSessionData").await.unwrap();
        assert!(store.get("finegrainSessionData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let store = test_store().await;
        for key in ["normalSessionData", "finegrainSessionData", "originalSessionData"] {
            store.set(key, &serde_json::json!({})).await.unwrap();
        }
        let keys = store.list_keys().await.unwrap();
        assert_eq!(
            keys,
            vec!["finegrainSessionData", "normalSessionData", "originalSessionData"]
        );
    }

    #[tokio::test]
    async fn test_full_session_service_over_sqlite() {
        let service = SessionService::new(test_store().await);
        let original = default_session();
        service.save_original(&original).await.unwrap();

        let mut forked = original.clone();
        forked.scene.plot_line = "Edited in normal mode".to_string();
        service.save(Mode::Normal, &forked).await.unwrap();

        assert_eq!(service.load(Mode::Normal).await.unwrap(), forked);
        assert_eq!(service.load(Mode::FineGrain).await.unwrap(), original);

        service.clear_mode(Mode::Normal).await.unwrap();
        assert_eq!(service.load(Mode::Normal).await.unwrap(), original);
    }
}
