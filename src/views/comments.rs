use anyhow::Result;
use std::collections::BTreeMap;

use crate::app::AppContext;
use crate::models::{Comment, NewComment};

/// Comment thread of one ticket, fetched when first expanded.
pub struct CommentsSection {
    ctx: AppContext,
    ticket_id: i64,
    comments: Vec<Comment>,
    loaded: bool,
}

impl CommentsSection {
    pub fn new(ctx: AppContext, ticket_id: i64) -> Self {
        CommentsSection {
            ctx,
            ticket_id,
            comments: Vec::new(),
            loaded: false,
        }
    }

    pub fn ticket_id(&self) -> i64 {
        self.ticket_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch on first expansion; later expansions reuse what was loaded.
    pub fn expand(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<()> {
        match self.ctx.backend.comments(self.ticket_id) {
            Ok(comments) => {
                self.comments = comments;
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                tracing::error!(ticket_id = self.ticket_id, error = %e, "failed to load comments");
                Err(e.into())
            }
        }
    }

    /// Post `content` and reload the thread. Blank input is ignored and
    /// returns `false`. Comments from this client are always internal.
    pub fn post(&mut self, content: &str) -> Result<bool> {
        if content.trim().is_empty() {
            return Ok(false);
        }

        let comment = NewComment {
            content: content.to_string(),
            ticket_id: self.ticket_id,
            is_internal: true,
        };
        if let Err(e) = self.ctx.backend.post_comment(&comment) {
            tracing::error!(ticket_id = self.ticket_id, error = %e, "failed to post comment");
            return Err(e.into());
        }
        self.refresh()?;
        Ok(true)
    }
}

/// Every comment visible to the user across all tickets, grouped by ticket
/// id in ascending order.
pub fn load_all(ctx: &AppContext) -> Result<Vec<(i64, Vec<Comment>)>> {
    let comments = match ctx.backend.all_comments() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load comments");
            return Err(e.into());
        }
    };

    let mut by_ticket: BTreeMap<i64, Vec<Comment>> = BTreeMap::new();
    for comment in comments {
        by_ticket.entry(comment.ticket_id).or_default().push(comment);
    }
    Ok(by_ticket.into_iter().collect())
}
