/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - auth: the authenticator holding the process-wide verification key
 *   - files: storage backend used by the file handlers
 * - Must be cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::{auth::Authenticator, storage::FileStore};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    pub files: Arc<dyn FileStore>,
}

impl AppState {
    pub fn new(auth: Arc<Authenticator>, files: Arc<dyn FileStore>) -> Self {
        Self { auth, files }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("files", &self.files.backend_name())
            .finish()
    }
}
