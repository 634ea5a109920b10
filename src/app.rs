//! Application context
//!
//! Everything a view needs is bundled here and handed to its constructor:
//! the session store and the backend. There is no global state.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{ApiClient, Backend};
use crate::config::Config;
use crate::models::User;
use crate::session::SessionStore;
use crate::storage::LocalStore;

#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub backend: Arc<dyn Backend>,
}

impl AppContext {
    pub fn new(session: Arc<SessionStore>, backend: Arc<dyn Backend>) -> Self {
        AppContext { session, backend }
    }

    /// Open local storage under the configured data directory and connect
    /// the HTTP backend to it.
    pub fn open(config: &Config) -> Result<Self> {
        let storage_path = config.storage_path();
        tracing::debug!(path = %storage_path.display(), "opening local storage");

        let storage = Arc::new(LocalStore::open(&storage_path)?);
        let session = Arc::new(SessionStore::open(Arc::clone(&storage))?);
        let client = ApiClient::new(&config.api_url, storage).context("Failed to build HTTP client")?;

        Ok(AppContext::new(session, Arc::new(client)))
    }

    /// The signed-in user. Fails the way the UI redirects to the login page.
    pub fn require_user(&self) -> Result<User> {
        match self.session.user() {
            Some(user) => Ok(user),
            None => anyhow::bail!("Not logged in. Run 'ticketdesk login' first."),
        }
    }
}
