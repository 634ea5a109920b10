use crate::api::error::Result;
use crate::models::{
    Category, Comment, Credentials, LoginResponse, NewComment, NewTicket, Notification, Operator,
    ProfileUpdate, Registration, Status, Ticket, User,
};

/// The remote ticketing service, one method per endpoint.
///
/// [`ApiClient`](crate::api::ApiClient) is the HTTP implementation. Views only
/// see this trait, which keeps them testable without a server.
pub trait Backend: Send + Sync {
    /// `POST /users/login`
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    /// `POST /users/register`
    fn register(&self, registration: &Registration) -> Result<LoginResponse>;
    /// `PUT /users/`
    fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;
    /// `GET /users/operators`
    fn operators(&self) -> Result<Vec<Operator>>;

    /// `GET /categories/`
    fn categories(&self) -> Result<Vec<Category>>;

    /// `GET /tickets/`
    fn all_tickets(&self) -> Result<Vec<Ticket>>;
    /// `GET /tickets/my`
    fn my_tickets(&self) -> Result<Vec<Ticket>>;
    /// `GET /tickets/{operator_id}/assigned`
    fn assigned_tickets(&self, operator_id: i64) -> Result<Vec<Ticket>>;
    /// `POST /tickets/` (multipart)
    fn create_ticket(&self, ticket: &NewTicket) -> Result<()>;
    /// `PUT /tickets/{id}/updateStatus`
    fn update_status(&self, ticket_id: i64, status: Status) -> Result<()>;
    /// `PUT /tickets/{id}/assign`
    fn assign(&self, ticket_id: i64, operator_id: i64) -> Result<()>;
    /// `DELETE /tickets/{id}`
    fn delete_ticket(&self, ticket_id: i64) -> Result<()>;

    /// `GET /comments`
    fn all_comments(&self) -> Result<Vec<Comment>>;
    /// `GET /comments/{ticket_id}`
    fn comments(&self, ticket_id: i64) -> Result<Vec<Comment>>;
    /// `POST /comments`
    fn post_comment(&self, comment: &NewComment) -> Result<()>;

    /// `GET /notifications`
    fn notifications(&self) -> Result<Vec<Notification>>;
    /// `GET /notifications/unreaded`
    fn unread_count(&self) -> Result<u64>;
    /// `POST /notifications/read/{id}`
    fn mark_read(&self, notification_id: i64) -> Result<()>;
}
