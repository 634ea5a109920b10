//! View state
//!
//! Each view owns the transient copy of the remote data it shows and the
//! actions it offers. Rendering is left to the CLI commands.

pub mod auth;
pub mod comments;
pub mod create_ticket;
pub mod home;
pub mod notifications;
pub mod profile;
pub mod tickets;

use crate::models::Role;

/// Which ticket list a role gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Tickets the user submitted
    Own,
    /// Tickets assigned to this operator
    Assigned(i64),
    /// Every ticket
    All,
}

impl TicketScope {
    pub fn for_user(role: Role, user_id: i64) -> Self {
        match role {
            Role::Client => TicketScope::Own,
            Role::Operator => TicketScope::Assigned(user_id),
            Role::Admin => TicketScope::All,
        }
    }
}

/// Role-gated controls shown on a ticket card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub change_status: bool,
    pub assign: bool,
    pub delete: bool,
}

impl Controls {
    pub fn for_role(role: Role) -> Self {
        Controls {
            change_status: matches!(role, Role::Admin | Role::Operator),
            assign: role == Role::Admin,
            delete: true,
        }
    }

    pub fn none() -> Self {
        Controls {
            change_status: false,
            assign: false,
            delete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_sees_no_triage_controls() {
        let controls = Controls::for_role(Role::Client);
        assert!(!controls.change_status);
        assert!(!controls.assign);
    }

    #[test]
    fn test_operator_changes_status_only() {
        let controls = Controls::for_role(Role::Operator);
        assert!(controls.change_status);
        assert!(!controls.assign);
    }

    #[test]
    fn test_admin_sees_everything() {
        let controls = Controls::for_role(Role::Admin);
        assert!(controls.change_status);
        assert!(controls.assign);
        assert!(controls.delete);
    }

    #[test]
    fn test_scope_per_role() {
        assert_eq!(TicketScope::for_user(Role::Client, 3), TicketScope::Own);
        assert_eq!(TicketScope::for_user(Role::Operator, 3), TicketScope::Assigned(3));
        assert_eq!(TicketScope::for_user(Role::Admin, 3), TicketScope::All);
    }
}
