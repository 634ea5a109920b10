use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::models::{Category, NewTicket, Priority};

/// Form state of the ticket creation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub priority: Priority,
    pub incident_date: Option<NaiveDate>,
    pub files: Vec<PathBuf>,
}

impl TicketDraft {
    pub fn validate(&self) -> Result<NewTicket> {
        if self.title.trim().is_empty() {
            bail!("Title is required");
        }
        if self.description.trim().is_empty() {
            bail!("Description is required");
        }
        let category_id = match self.category_id {
            Some(id) => id,
            None => bail!("Category is required"),
        };

        Ok(NewTicket {
            title: self.title.clone(),
            description: self.description.clone(),
            category_id,
            priority: self.priority,
            incident_date: self.incident_date,
            files: self.files.clone(),
        })
    }
}

pub struct CreateTicketModal {
    ctx: AppContext,
    open: bool,
    categories: Vec<Category>,
    pub draft: TicketDraft,
}

impl CreateTicketModal {
    pub fn new(ctx: AppContext) -> Self {
        CreateTicketModal {
            ctx,
            open: false,
            categories: Vec::new(),
            draft: TicketDraft::default(),
        }
    }

    /// Show the dialog and load the category choices.
    pub fn open(&mut self) -> Result<()> {
        self.open = true;
        match self.ctx.backend.categories() {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load categories");
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Resolve a category given by id or (case-insensitive) name.
    pub fn find_category(&self, key: &str) -> Option<&Category> {
        let key = key.trim();
        match key.parse::<i64>() {
            Ok(id) => self.categories.iter().find(|c| c.id == id),
            Err(_) => self
                .categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(key)),
        }
    }

    pub fn attach(&mut self, path: PathBuf) {
        self.draft.files.push(path);
    }

    /// Send the draft. On success the dialog closes and the draft resets;
    /// on failure both stay as they were.
    pub fn submit(&mut self) -> Result<()> {
        let ticket = self.draft.validate()?;
        if let Err(e) = self.ctx.backend.create_ticket(&ticket) {
            tracing::error!(error = %e, "failed to create ticket");
            return Err(e.into());
        }
        tracing::info!(title = %ticket.title, files = ticket.files.len(), "ticket submitted");
        self.draft = TicketDraft::default();
        self.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::setup_context;
    use crate::models::{Role, Status};

    fn badge_reader_draft() -> TicketDraft {
        TicketDraft {
            title: "Broken badge reader".to_string(),
            description: "Door 4 unresponsive".to_string(),
            category_id: Some(2),
            ..TicketDraft::default()
        }
    }

    #[test]
    fn test_priority_defaults_to_medium_on_the_wire() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        let mut modal = CreateTicketModal::new(ctx);
        modal.open().unwrap();
        modal.draft = badge_reader_draft();
        modal.submit().unwrap();

        let state = backend.state();
        let sent = &state.created[0];
        assert_eq!(sent.priority, Priority::Medium);
        assert!(sent
            .form_fields()
            .contains(&("priority", "MEDIUM".to_string())));
        assert_eq!(state.tickets.last().unwrap().status, Status::New);
    }

    #[test]
    fn test_submit_closes_and_resets() {
        let (ctx, _backend, _dir) = setup_context(Some(Role::Client));
        let mut modal = CreateTicketModal::new(ctx);
        modal.open().unwrap();
        modal.draft = badge_reader_draft();
        modal.submit().unwrap();

        assert!(!modal.is_open());
        assert_eq!(modal.draft, TicketDraft::default());
    }

    #[test]
    fn test_failure_keeps_form_state() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.fail("POST /tickets/");
        let mut modal = CreateTicketModal::new(ctx);
        modal.open().unwrap();
        modal.draft = badge_reader_draft();

        assert!(modal.submit().is_err());
        assert!(modal.is_open());
        assert_eq!(modal.draft, badge_reader_draft());
    }

    #[test]
    fn test_required_fields() {
        let mut draft = badge_reader_draft();
        draft.title = "  ".to_string();
        assert!(draft.validate().unwrap_err().to_string().contains("Title"));

        let mut draft = badge_reader_draft();
        draft.description.clear();
        assert!(draft.validate().unwrap_err().to_string().contains("Description"));

        let mut draft = badge_reader_draft();
        draft.category_id = None;
        assert!(draft.validate().unwrap_err().to_string().contains("Category"));
    }

    #[test]
    fn test_invalid_draft_never_sent() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        let mut modal = CreateTicketModal::new(ctx);
        modal.open().unwrap();
        assert!(modal.submit().is_err());
        assert!(backend.state().created.is_empty());
    }

    #[test]
    fn test_any_number_of_attachments() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        let mut modal = CreateTicketModal::new(ctx);
        modal.draft = badge_reader_draft();
        for i in 0..5 {
            modal.attach(PathBuf::from(format!("evidence-{}.png", i)));
        }
        modal.submit().unwrap();
        assert_eq!(backend.state().created[0].files.len(), 5);
    }

    #[test]
    fn test_find_category_by_id_or_name() {
        let (ctx, _backend, _dir) = setup_context(Some(Role::Client));
        let mut modal = CreateTicketModal::new(ctx);
        modal.open().unwrap();
        assert_eq!(modal.find_category("2").unwrap().name, "Physical access");
        assert_eq!(modal.find_category("network").unwrap().id, 1);
        assert!(modal.find_category("hardware").is_none());
    }
}
