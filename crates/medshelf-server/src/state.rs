//! Shared state for the HTTP handlers.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use medshelf_core::db::Database;
use medshelf_core::reconcile::{ReconcilerConfig, SearchProvider};
use medshelf_providers::AssistantClient;

use crate::error::ApiError;

/// Shared context for all routes.
///
/// The database sits behind a mutex; handler queries are short so contention
/// stays low. The chat context is the plain-text rendering of the most recent
/// prescription report, replaced on each upload.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub search: Arc<dyn SearchProvider + Send + Sync>,
    pub assistant: Arc<dyn AssistantClient>,
    pub chat_context: Arc<RwLock<Option<String>>>,
    pub reconciler_config: ReconcilerConfig,
}

impl AppState {
    pub fn new(
        db: Database,
        search: Arc<dyn SearchProvider + Send + Sync>,
        assistant: Arc<dyn AssistantClient>,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            search,
            assistant,
            chat_context: Arc::new(RwLock::new(None)),
            reconciler_config: ReconcilerConfig::default(),
        }
    }

    /// Lock the database, mapping a poisoned lock to an internal error.
    pub fn lock_db(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }

    /// Replace the stored chat context.
    pub fn set_chat_context(&self, context: String) -> Result<(), ApiError> {
        let mut guard = self
            .chat_context
            .write()
            .map_err(|_| ApiError::Internal("chat context lock poisoned".into()))?;
        *guard = Some(context);
        Ok(())
    }

    /// The stored chat context, if a prescription has been analyzed.
    pub fn get_chat_context(&self) -> Result<Option<String>, ApiError> {
        let guard = self
            .chat_context
            .read()
            .map_err(|_| ApiError::Internal("chat context lock poisoned".into()))?;
        Ok(guard.clone())
    }
}
