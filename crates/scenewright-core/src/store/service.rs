//! Session service: the mode fork/fallback/reset contract.
//!
//! A session is created once at setup and saved under the original key.
//! Each generation mode persists its own forked copy under a mode-scoped
//! key; loading a mode falls back to the original until the mode has
//! saved its first edit. Reset and clear discard the mode copy; clear-all
//! discards everything.

use scenewright_types::error::{SessionError, StoreError};
use scenewright_types::session::{Mode, ORIGINAL_SESSION_KEY, SceneSession};

use super::session_store::SessionStore;

/// Mode-aware session persistence over a [`SessionStore`].
///
/// All writes are write-through whole-object replacements; callers pass a
/// fully merged session, never a partial update.
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the session visible to `mode`: the mode copy if one exists,
    /// else the original, else [`SessionError::Missing`] (callers route
    /// that back to setup).
    pub async fn load(&self, mode: Mode) -> Result<SceneSession, SessionError> {
        if let Some(value) = self.store.get(&mode.storage_key()).await? {
            return decode(value);
        }
        tracing::debug!(%mode, "no mode copy, falling back to original session");
        self.load_original().await
    }

    /// Load the original (setup-time) session.
    pub async fn load_original(&self) -> Result<SceneSession, SessionError> {
        match self.store.get(ORIGINAL_SESSION_KEY).await? {
            Some(value) => decode(value),
            None => Err(SessionError::Missing),
        }
    }

    /// Whether an original session exists.
    pub async fn has_original(&self) -> Result<bool, SessionError> {
        Ok(self.store.get(ORIGINAL_SESSION_KEY).await?.is_some())
    }

    /// Persist `session` as `mode`'s forked copy, replacing any previous
    /// copy entirely.
    pub async fn save(&self, mode: Mode, session: &SceneSession) -> Result<(), SessionError> {
        let value = encode(session)?;
        self.store.set(&mode.storage_key(), &value).await?;
        Ok(())
    }

    /// Persist `session` as the original. Used by setup.
    pub async fn save_original(&self, session: &SceneSession) -> Result<(), SessionError> {
        let value = encode(session)?;
        self.store.set(ORIGINAL_SESSION_KEY, &value).await?;
        Ok(())
    }

    /// Discard `mode`'s copy and return the original, which subsequent
    /// loads will see.
    pub async fn reset_to_original(&self, mode: Mode) -> Result<SceneSession, SessionError> {
        self.store.delete(&mode.storage_key()).await?;
        tracing::info!(%mode, "session reset to original");
        self.load_original().await
    }

    /// Discard `mode`'s copy only. The original and other modes' copies
    /// are untouched.
    pub async fn clear_mode(&self, mode: Mode) -> Result<(), SessionError> {
        self.store.delete(&mode.storage_key()).await?;
        tracing::info!(%mode, "mode session cleared");
        Ok(())
    }

    /// Discard the original and every mode copy, returning the
    /// application to setup state.
    pub async fn clear_all(&self) -> Result<(), SessionError> {
        self.store.delete(ORIGINAL_SESSION_KEY).await?;
        for mode in Mode::ALL {
            self.store.delete(&mode.storage_key()).await?;
        }
        tracing::info!("all session data cleared");
        Ok(())
    }
}

fn encode(session: &SceneSession) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(session)
        .map_err(|e| StoreError::Query(format!("failed to serialize session: {e}")))
}

fn decode(value: serde_json::Value) -> Result<SceneSession, SessionError> {
    serde_json::from_value(value)
        .map_err(|e| SessionError::Store(StoreError::Query(format!("invalid stored session: {e}"))))
}
