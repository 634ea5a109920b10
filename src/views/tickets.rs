use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::models::{Operator, Role, Status, Ticket};
use crate::views::{Controls, TicketScope};

/// Role-dependent ticket list.
///
/// Status changes and assignments are followed by a full refresh so the
/// list always reflects the server. Deletion is the exception: the deleted
/// ticket is filtered out locally.
pub struct TicketListView {
    ctx: AppContext,
    tickets: Vec<Ticket>,
    operators: Vec<Operator>,
}

impl TicketListView {
    pub fn new(ctx: AppContext) -> Self {
        TicketListView {
            ctx,
            tickets: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Load operators (admins only, for the assignment control) and tickets.
    pub fn mount(&mut self) -> Result<()> {
        if self.ctx.session.role() == Some(Role::Admin) {
            match self.ctx.backend.operators() {
                Ok(operators) => self.operators = operators,
                Err(e) => tracing::error!(error = %e, "failed to load operators"),
            }
        }
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<()> {
        let user = match self.ctx.session.user() {
            Some(u) => u,
            None => return Ok(()),
        };

        let result = match TicketScope::for_user(user.role, user.id) {
            TicketScope::Own => self.ctx.backend.my_tickets(),
            TicketScope::Assigned(id) => self.ctx.backend.assigned_tickets(id),
            TicketScope::All => self.ctx.backend.all_tickets(),
        };

        match result {
            Ok(tickets) => {
                tracing::debug!(count = tickets.len(), "tickets refreshed");
                self.tickets = tickets;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load tickets");
                Err(e.into())
            }
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn operator_name(&self, id: i64) -> Option<&str> {
        self.operators
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.name.as_str())
    }

    pub fn controls(&self) -> Controls {
        self.ctx
            .session
            .role()
            .map(Controls::for_role)
            .unwrap_or_else(Controls::none)
    }

    pub fn heading(&self) -> &'static str {
        match self.ctx.session.role() {
            Some(Role::Admin) => "All tickets",
            Some(Role::Operator) => "Assigned tickets",
            _ => "My tickets",
        }
    }

    /// Delete after `confirm` agrees. Returns whether the ticket was deleted.
    pub fn delete(&mut self, id: i64, confirm: impl FnOnce(i64, Option<&Ticket>) -> bool) -> Result<bool> {
        if !self.controls().delete {
            bail!("Deleting tickets requires a signed-in user");
        }
        if !confirm(id, self.ticket(id)) {
            return Ok(false);
        }

        if let Err(e) = self.ctx.backend.delete_ticket(id) {
            tracing::error!(ticket_id = id, error = %e, "failed to delete ticket");
            return Err(e.into());
        }
        self.tickets.retain(|t| t.id != id);
        Ok(true)
    }

    pub fn change_status(&mut self, id: i64, status: Status) -> Result<()> {
        if !self.controls().change_status {
            bail!("Only operators and administrators can change ticket status");
        }
        if let Err(e) = self.ctx.backend.update_status(id, status) {
            tracing::error!(ticket_id = id, status = %status, error = %e, "failed to change status");
            return Err(e.into());
        }
        self.refresh()
    }

    pub fn assign(&mut self, id: i64, operator_id: i64) -> Result<()> {
        if !self.controls().assign {
            bail!("Only administrators can assign tickets");
        }
        if let Err(e) = self.ctx.backend.assign(id, operator_id) {
            tracing::error!(ticket_id = id, operator_id, error = %e, "failed to assign ticket");
            return Err(e.into());
        }
        self.refresh()
    }
}
