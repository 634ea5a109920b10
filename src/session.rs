//! Session store
//!
//! Holds the authenticated identity for the whole client. The token and the
//! user record are persisted together under fixed keys in [`LocalStore`] and
//! are always written or cleared in a single transaction, so no reader can
//! observe one without the other.

use anyhow::{anyhow, bail, Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{self, TOKEN_KEY, USER_KEY};
use crate::models::{LoginResponse, Role, Session, User};
use crate::storage::LocalStore;

/// Granularity at which a sleeping poll re-checks its cancel flag.
const CANCEL_CHECK_SLICE: Duration = Duration::from_millis(50);

pub struct SessionStore {
    storage: Arc<LocalStore>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store and hydrate it from persisted state.
    pub fn open(storage: Arc<LocalStore>) -> Result<Self> {
        let store = SessionStore {
            storage,
            current: RwLock::new(None),
        };
        store.hydrate()?;
        Ok(store)
    }

    pub fn storage(&self) -> &Arc<LocalStore> {
        &self.storage
    }

    /// Re-read the persisted session, replacing the in-memory copy.
    pub fn hydrate(&self) -> Result<Option<Session>> {
        let session = self.read_persisted()?;
        self.replace(session.clone())?;
        Ok(session)
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let token = self.storage.get(TOKEN_KEY)?;
        let user = self.storage.get(USER_KEY)?;

        match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str::<User>(&user) {
                Ok(user) => Ok(Some(Session { token, user })),
                Err(e) => {
                    tracing::warn!(error = %e, "persisted user record is unreadable, ignoring session");
                    Ok(None)
                }
            },
            (None, None) => Ok(None),
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    "persisted session is incomplete, ignoring it"
                );
                Ok(None)
            }
        }
    }

    fn replace(&self, session: Option<Session>) -> Result<()> {
        let mut current = self
            .current
            .write()
            .map_err(|_| anyhow!("Session state poisoned"))?;
        *current = session;
        Ok(())
    }

    /// Persist a fresh login and make it the current session.
    pub fn login(&self, response: LoginResponse) -> Result<Session> {
        let user_json = serde_json::to_string(&response.user)?;
        self.storage
            .set_all(&[(TOKEN_KEY, &response.token), (USER_KEY, &user_json)])
            .context("Failed to persist session")?;

        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.replace(Some(session.clone()))?;
        tracing::info!(user_id = session.user.id, role = %session.user.role, "logged in");
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.storage
            .remove_all(&[TOKEN_KEY, USER_KEY])
            .context("Failed to clear session")?;
        self.replace(None)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Swap the cached user record after a profile edit. The token is kept.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let token = match self.storage.get(TOKEN_KEY)? {
            Some(t) => t,
            None => bail!("Not logged in"),
        };
        let user_json = serde_json::to_string(user)?;
        self.storage
            .set_all(&[(TOKEN_KEY, &token), (USER_KEY, &user_json)])
            .context("Failed to persist updated user")?;
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|s| s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.current().map(|s| s.user.role)
    }

    /// Whether a token is persisted right now, regardless of what this
    /// process has hydrated.
    pub fn has_persisted_token(&self) -> Result<bool> {
        Ok(self.storage.get(TOKEN_KEY)?.is_some())
    }

    /// Block until some process persists a session, or until `cancel` is set.
    ///
    /// Storage is only re-read when its data version moved, so an idle wait
    /// costs one pragma per interval. Returns `None` when cancelled.
    pub fn wait_for_login(&self, interval: Duration, cancel: &AtomicBool) -> Result<Option<Session>> {
        let interval = config::poll_interval(interval.as_millis().try_into().unwrap_or(u64::MAX));
        let mut seen_version: Option<i64> = None;

        loop {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!("session wait cancelled");
                return Ok(None);
            }

            let version = self.storage.data_version()?;
            if seen_version != Some(version) {
                seen_version = Some(version);
                if let Some(session) = self.hydrate()? {
                    tracing::debug!(user_id = session.user.id, "session hydrated from storage");
                    return Ok(Some(session));
                }
            }

            let deadline = Instant::now() + interval;
            while Instant::now() < deadline {
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                thread::sleep(CANCEL_CHECK_SLICE.min(deadline.saturating_duration_since(Instant::now())));
            }
        }
    }
}
