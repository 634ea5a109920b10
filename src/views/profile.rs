use anyhow::Result;

use crate::app::AppContext;
use crate::models::{ProfileUpdate, Role, User};

/// Entry points offered on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    MyTickets,
    CreateTicket,
    AllTickets,
    EditProfile,
    Logout,
}

impl ProfileAction {
    pub fn label(self) -> &'static str {
        match self {
            ProfileAction::MyTickets => "My tickets",
            ProfileAction::CreateTicket => "Create ticket",
            ProfileAction::AllTickets => "All tickets",
            ProfileAction::EditProfile => "Edit profile",
            ProfileAction::Logout => "Log out",
        }
    }

    /// CLI command that performs the action.
    pub fn command(self) -> &'static str {
        match self {
            ProfileAction::MyTickets | ProfileAction::AllTickets => "ticketdesk list",
            ProfileAction::CreateTicket => "ticketdesk create",
            ProfileAction::EditProfile => "ticketdesk edit-profile",
            ProfileAction::Logout => "ticketdesk logout",
        }
    }
}

pub struct ProfileView {
    ctx: AppContext,
}

impl ProfileView {
    pub fn new(ctx: AppContext) -> Self {
        ProfileView { ctx }
    }

    pub fn user(&self) -> Option<User> {
        self.ctx.session.user()
    }

    pub fn actions(&self) -> Vec<ProfileAction> {
        let mut actions = match self.ctx.session.role() {
            Some(Role::Client) => vec![ProfileAction::MyTickets, ProfileAction::CreateTicket],
            Some(Role::Operator) | Some(Role::Admin) => vec![ProfileAction::AllTickets],
            None => return Vec::new(),
        };
        actions.push(ProfileAction::EditProfile);
        actions.push(ProfileAction::Logout);
        actions
    }

    pub fn logout(&self) -> Result<()> {
        self.ctx.session.logout()
    }
}

/// Edit-profile dialog, prefilled from the current user.
pub struct EditProfileForm {
    ctx: AppContext,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl EditProfileForm {
    pub fn new(ctx: AppContext) -> Result<Self> {
        let user = ctx.require_user()?;
        Ok(EditProfileForm {
            ctx,
            name: user.name,
            email: user.email,
            password: String::new(),
        })
    }

    pub fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            password: if self.password.is_empty() {
                None
            } else {
                Some(self.password.clone())
            },
        }
    }

    /// Send the update, store the user the server returns, and re-hydrate
    /// the session from storage.
    pub fn submit(&self) -> Result<User> {
        let user = match self.ctx.backend.update_profile(&self.update()) {
            Ok(u) => u,
            Err(e) => {
                tracing::error!(error = %e, "failed to update profile");
                return Err(e.into());
            }
        };
        self.ctx.session.update_user(&user)?;
        self.ctx.session.hydrate()?;
        Ok(user)
    }
}
