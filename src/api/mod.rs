//! API gateway client
//!
//! A thin blocking HTTP wrapper over the ticketing service. Every request
//! goes to `base_url + path` and carries the bearer token currently in
//! local storage. There is no retry, backoff or timeout policy: a failed
//! call is returned to the caller as an [`ApiError`].

mod backend;
pub mod error;
#[cfg(test)]
pub mod fake;

pub use backend::Backend;
pub use error::{ApiError, Result};
pub use reqwest::Method;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::TOKEN_KEY;
use crate::models::{
    Category, Comment, Credentials, LoginResponse, NewComment, NewTicket, Notification, Operator,
    ProfileUpdate, Registration, Status, Ticket, UnreadCount, User,
};
use crate::storage::LocalStore;

/// Join a base address and a resource path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    storage: Arc<LocalStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, storage: Arc<LocalStore>) -> Result<Self> {
        // the blocking client defaults to a 30 s total timeout; calls here wait
        // for the server however long it takes
        let http = Client::builder()
            .user_agent(concat!("ticketdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.to_string(),
            storage,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn bearer(&self) -> Result<Option<String>> {
        self.storage
            .get(TOKEN_KEY)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Issue one request. `body`, when given, is sent as JSON; `headers` are
    /// added verbatim after the bearer token.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let mut builder = self.http.request(method.clone(), self.endpoint(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder, &method, path)
    }

    fn send(&self, builder: RequestBuilder, method: &Method, path: &str) -> Result<Response> {
        let builder = match self.bearer()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        tracing::debug!(%method, path, "sending request");
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::debug!(%method, path, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::decode(self.request(Method::GET, path, None, &[])?)
    }

    fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Response> {
        let value = serde_json::to_value(body)?;
        self.request(method, path, Some(&value), &[])
    }
}

impl Backend for ApiClient {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        Self::decode(self.send_json(Method::POST, "/users/login", credentials)?)
    }

    fn register(&self, registration: &Registration) -> Result<LoginResponse> {
        Self::decode(self.send_json(Method::POST, "/users/register", registration)?)
    }

    fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        Self::decode(self.send_json(Method::PUT, "/users/", update)?)
    }

    fn operators(&self) -> Result<Vec<Operator>> {
        self.get_json("/users/operators")
    }

    fn categories(&self) -> Result<Vec<Category>> {
        self.get_json("/categories/")
    }

    fn all_tickets(&self) -> Result<Vec<Ticket>> {
        self.get_json("/tickets/")
    }

    fn my_tickets(&self) -> Result<Vec<Ticket>> {
        self.get_json("/tickets/my")
    }

    fn assigned_tickets(&self, operator_id: i64) -> Result<Vec<Ticket>> {
        self.get_json(&format!("/tickets/{}/assigned", operator_id))
    }

    fn create_ticket(&self, ticket: &NewTicket) -> Result<()> {
        let mut form = multipart::Form::new();
        for (name, value) in ticket.form_fields() {
            form = form.text(name, value);
        }
        for path in &ticket.files {
            form = form.file("files", path).map_err(|source| ApiError::Attachment {
                path: path.clone(),
                source,
            })?;
        }

        let builder = self.http.post(self.endpoint("/tickets/")).multipart(form);
        self.send(builder, &Method::POST, "/tickets/")?;
        Ok(())
    }

    fn update_status(&self, ticket_id: i64, status: Status) -> Result<()> {
        let path = format!("/tickets/{}/updateStatus", ticket_id);
        self.send_json(Method::PUT, &path, &json!({ "status": status }))?;
        Ok(())
    }

    fn assign(&self, ticket_id: i64, operator_id: i64) -> Result<()> {
        let path = format!("/tickets/{}/assign", ticket_id);
        self.send_json(Method::PUT, &path, &json!({ "assignedToId": operator_id }))?;
        Ok(())
    }

    fn delete_ticket(&self, ticket_id: i64) -> Result<()> {
        self.request(Method::DELETE, &format!("/tickets/{}", ticket_id), None, &[])?;
        Ok(())
    }

    fn all_comments(&self) -> Result<Vec<Comment>> {
        self.get_json("/comments")
    }

    fn comments(&self, ticket_id: i64) -> Result<Vec<Comment>> {
        self.get_json(&format!("/comments/{}", ticket_id))
    }

    fn post_comment(&self, comment: &NewComment) -> Result<()> {
        self.send_json(Method::POST, "/comments", comment)?;
        Ok(())
    }

    fn notifications(&self) -> Result<Vec<Notification>> {
        self.get_json("/notifications")
    }

    fn unread_count(&self) -> Result<u64> {
        let unread: UnreadCount = self.get_json("/notifications/unreaded")?;
        Ok(unread.count)
    }

    fn mark_read(&self, notification_id: i64) -> Result<()> {
        self.request(
            Method::POST,
            &format!("/notifications/read/{}", notification_id),
            None,
            &[],
        )?;
        Ok(())
    }
}
