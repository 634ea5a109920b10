use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::models::User;

/// Landing page: greets the user and shows how many notifications are
/// unread. Without a persisted token it sends the user to log in.
pub struct HomeView {
    ctx: AppContext,
    unread: Option<u64>,
}

impl HomeView {
    pub fn new(ctx: AppContext) -> Self {
        HomeView { ctx, unread: None }
    }

    pub fn mount(&mut self) -> Result<User> {
        if !self.ctx.session.has_persisted_token()? {
            bail!("Not logged in. Run 'ticketdesk login' first.");
        }
        let user = self.ctx.require_user()?;

        // a missing badge count is not worth failing the page over
        match self.ctx.backend.unread_count() {
            Ok(count) => self.unread = Some(count),
            Err(e) => tracing::error!(error = %e, "failed to load unread count"),
        }
        Ok(user)
    }

    pub fn unread(&self) -> Option<u64> {
        self.unread
    }
}
