use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::models::{Credentials, Registration, Session};

pub fn login(ctx: &AppContext, email: &str, password: &str) -> Result<Session> {
    if email.trim().is_empty() || password.is_empty() {
        bail!("Email and password are required");
    }
    let credentials = Credentials {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let response = match ctx.backend.login(&credentials) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            return Err(e.into());
        }
    };
    ctx.session.login(response)
}

pub fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<Session> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("Name, email and password are required");
    }
    let registration = Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let response = match ctx.backend.register(&registration) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            return Err(e.into());
        }
    };
    ctx.session.login(response)
}
