use anyhow::{Context, Result};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::app::AppContext;

pub fn status(ctx: &AppContext) -> Result<()> {
    match ctx.session.current() {
        Some(session) => {
            println!("Logged in as {} <{}>", session.user.name, session.user.email);
            println!("Role: {}", session.user.role);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Wait for a login made by another ticketdesk process. Ctrl-C stops it.
pub fn wait(ctx: &AppContext, interval: Duration) -> Result<()> {
    let cancel = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&cancel))
        .context("Failed to install SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&cancel))
        .context("Failed to install SIGTERM handler")?;

    wait_until(ctx, interval, &cancel)
}

fn wait_until(ctx: &AppContext, interval: Duration, cancel: &AtomicBool) -> Result<()> {
    if ctx.session.current().is_none() {
        println!("Waiting for a login... (Ctrl-C to stop)");
    }
    match ctx.session.wait_for_login(interval, cancel)? {
        Some(session) => println!("Logged in as {} ({})", session.user.name, session.user.role.label()),
        None => println!("Stopped waiting."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::setup_context;
    use crate::models::Role;

    #[test]
    fn test_wait_returns_when_logged_in() {
        let (ctx, _backend, _dir) = setup_context(Some(Role::Client));
        let cancel = AtomicBool::new(false);
        assert!(wait_until(&ctx, Duration::from_millis(250), &cancel).is_ok());
    }

    #[test]
    fn test_wait_stops_on_cancel() {
        let (ctx, _backend, _dir) = setup_context(None);
        let cancel = AtomicBool::new(true);
        assert!(wait_until(&ctx, Duration::from_millis(250), &cancel).is_ok());
        assert!(ctx.session.current().is_none());
    }

    #[test]
    fn test_status_either_way() {
        let (ctx, _backend, _dir) = setup_context(None);
        assert!(status(&ctx).is_ok());
        let (ctx, _backend, _dir) = setup_context(Some(Role::Admin));
        assert!(status(&ctx).is_ok());
    }
}
