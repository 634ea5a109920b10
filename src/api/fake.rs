//! In-memory [`Backend`] used by view and command tests.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

use crate::api::error::{ApiError, Result};
use crate::api::Backend;
use crate::app::AppContext;
use crate::models::{
    Author, Category, Comment, Credentials, LoginResponse, NewComment, NewTicket, Notification,
    NotificationType, Operator, Priority, ProfileUpdate, Registration, Role, Status, Ticket, User,
};
use crate::session::SessionStore;
use crate::storage::LocalStore;

#[derive(Default)]
pub struct FakeState {
    pub users: Vec<(User, String)>,
    pub tickets: Vec<Ticket>,
    pub comments: Vec<Comment>,
    pub notifications: Vec<Notification>,
    pub categories: Vec<Category>,
    pub operators: Vec<Operator>,
    pub created: Vec<NewTicket>,
    pub mark_read_calls: HashMap<i64, usize>,
    pub calls: Vec<String>,
    /// Endpoints (as logged in `calls`) that should fail with a 500.
    pub failing: Vec<String>,
    pub next_id: i64,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state();
            state.next_id = 100;
            state.categories = vec![
                Category { id: 1, name: "Network".to_string() },
                Category { id: 2, name: "Physical access".to_string() },
            ];
            state.operators = vec![
                Operator { id: 11, name: "Olga".to_string(), email: None },
                Operator { id: 12, name: "Omar".to_string(), email: None },
            ];
        }
        Arc::new(backend)
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_ticket(&self, id: i64, title: &str, status: Status, assigned_to_id: Option<i64>) {
        self.state().tickets.push(Ticket {
            id,
            title: title.to_string(),
            description: String::new(),
            category_id: Some(1),
            priority: Priority::Medium,
            status,
            assigned_to_id,
            attachments: Vec::new(),
            category: Some(Category { id: 1, name: "Network".to_string() }),
        });
    }

    pub fn with_notification(&self, id: i64, is_read: bool) {
        self.state().notifications.push(Notification {
            id,
            kind: NotificationType::StatusChanged,
            message: format!("Notification {}", id),
            created_at: Utc::now(),
            is_read,
        });
    }

    pub fn fail(&self, call: &str) {
        self.state().failing.push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn record(&self, call: String) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        let failing = state.failing.contains(&call);
        state.calls.push(call);
        if failing {
            return Err(ApiError::Status {
                status: 500,
                body: "fake failure".to_string(),
            });
        }
        Ok(state)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        body: "not found".to_string(),
    }
}

impl Backend for FakeBackend {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let state = self.record("POST /users/login".to_string())?;
        state
            .users
            .iter()
            .find(|(u, p)| u.email == credentials.email && *p == credentials.password)
            .map(|(u, _)| LoginResponse {
                token: format!("token-{}", u.id),
                user: u.clone(),
            })
            .ok_or(ApiError::Status {
                status: 401,
                body: "bad credentials".to_string(),
            })
    }

    fn register(&self, registration: &Registration) -> Result<LoginResponse> {
        let mut state = self.record("POST /users/register".to_string())?;
        state.next_id += 1;
        let user = User {
            id: state.next_id,
            name: registration.name.clone(),
            email: registration.email.clone(),
            role: Role::Client,
        };
        state.users.push((user.clone(), registration.password.clone()));
        Ok(LoginResponse {
            token: format!("token-{}", user.id),
            user,
        })
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let mut state = self.record("PUT /users/".to_string())?;
        let (user, password) = state.users.first_mut().ok_or_else(not_found)?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        if let Some(p) = &update.password {
            *password = p.clone();
        }
        Ok(user.clone())
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        Ok(self.record("GET /users/operators".to_string())?.operators.clone())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.record("GET /categories/".to_string())?.categories.clone())
    }

    fn all_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.record("GET /tickets/".to_string())?.tickets.clone())
    }

    fn my_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.record("GET /tickets/my".to_string())?.tickets.clone())
    }

    fn assigned_tickets(&self, operator_id: i64) -> Result<Vec<Ticket>> {
        let state = self.record(format!("GET /tickets/{}/assigned", operator_id))?;
        Ok(state
            .tickets
            .iter()
            .filter(|t| t.assigned_to_id == Some(operator_id))
            .cloned()
            .collect())
    }

    fn create_ticket(&self, ticket: &NewTicket) -> Result<()> {
        let mut state = self.record("POST /tickets/".to_string())?;
        state.next_id += 1;
        let id = state.next_id;
        let category = state.categories.iter().find(|c| c.id == ticket.category_id).cloned();
        state.tickets.push(Ticket {
            id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            category_id: Some(ticket.category_id),
            priority: ticket.priority,
            status: Status::New,
            assigned_to_id: None,
            attachments: Vec::new(),
            category,
        });
        state.created.push(ticket.clone());
        Ok(())
    }

    fn update_status(&self, ticket_id: i64, status: Status) -> Result<()> {
        let mut state = self.record(format!("PUT /tickets/{}/updateStatus", ticket_id))?;
        let ticket = state.tickets.iter_mut().find(|t| t.id == ticket_id).ok_or_else(not_found)?;
        ticket.status = status;
        Ok(())
    }

    fn assign(&self, ticket_id: i64, operator_id: i64) -> Result<()> {
        let mut state = self.record(format!("PUT /tickets/{}/assign", ticket_id))?;
        let ticket = state.tickets.iter_mut().find(|t| t.id == ticket_id).ok_or_else(not_found)?;
        ticket.assigned_to_id = Some(operator_id);
        Ok(())
    }

    fn delete_ticket(&self, ticket_id: i64) -> Result<()> {
        let mut state = self.record(format!("DELETE /tickets/{}", ticket_id))?;
        let before = state.tickets.len();
        state.tickets.retain(|t| t.id != ticket_id);
        if state.tickets.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    fn all_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.record("GET /comments".to_string())?.comments.clone())
    }

    fn comments(&self, ticket_id: i64) -> Result<Vec<Comment>> {
        let state = self.record(format!("GET /comments/{}", ticket_id))?;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    fn post_comment(&self, comment: &NewComment) -> Result<()> {
        let mut state = self.record("POST /comments".to_string())?;
        state.next_id += 1;
        let id = state.next_id;
        state.comments.push(Comment {
            id,
            content: comment.content.clone(),
            author: Author { id: 1, name: "Tester".to_string() },
            created_at: Utc::now(),
            ticket_id: comment.ticket_id,
            is_internal: comment.is_internal,
        });
        Ok(())
    }

    fn notifications(&self) -> Result<Vec<Notification>> {
        Ok(self.record("GET /notifications".to_string())?.notifications.clone())
    }

    fn unread_count(&self) -> Result<u64> {
        let state = self.record("GET /notifications/unreaded".to_string())?;
        Ok(state.notifications.iter().filter(|n| !n.is_read).count() as u64)
    }

    fn mark_read(&self, notification_id: i64) -> Result<()> {
        let mut state = self.record(format!("POST /notifications/read/{}", notification_id))?;
        *state.mark_read_calls.entry(notification_id).or_insert(0) += 1;
        let n = state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(not_found)?;
        n.is_read = true;
        Ok(())
    }
}

pub fn test_user(role: Role) -> User {
    let id = match role {
        Role::Client => 1,
        Role::Operator => 11,
        Role::Admin => 99,
    };
    User {
        id,
        name: format!("{} user", role.label()),
        email: format!("{}@example.com", role.as_str().to_lowercase()),
        role,
    }
}

/// Build a context over a temp-dir store, logged in as `role` when given.
pub fn setup_context(role: Option<Role>) -> (AppContext, Arc<FakeBackend>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStore::open(&dir.path().join("storage.db")).unwrap());
    let session = Arc::new(SessionStore::open(storage).unwrap());
    let backend = FakeBackend::new();
    if let Some(role) = role {
        let user = test_user(role);
        backend.state().users.push((user.clone(), "secret".to_string()));
        session
            .login(LoginResponse {
                token: format!("token-{}", user.id),
                user,
            })
            .unwrap();
    }
    let ctx = AppContext::new(session, backend.clone());
    (ctx, backend, dir)
}
