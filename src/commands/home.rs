use anyhow::Result;

use crate::app::AppContext;
use crate::views::home::HomeView;

pub fn run(ctx: &AppContext) -> Result<()> {
    let mut home = HomeView::new(ctx.clone());
    let user = home.mount()?;

    println!("Welcome, {} ({})", user.name, user.role.label());
    match home.unread() {
        Some(0) => println!("No unread notifications."),
        Some(n) => println!("{} unread notification(s). Run 'ticketdesk notifications'.", n),
        None => println!("Unread notifications: unavailable"),
    }
    println!();
    println!("Report an incident:  ticketdesk create <title> -d <description> -c <category>");
    println!("Your tickets:        ticketdesk list");
    println!("Profile:             ticketdesk profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::setup_context;
    use crate::models::Role;

    #[test]
    fn test_home_requires_login() {
        let (ctx, _backend, _dir) = setup_context(None);
        assert!(run(&ctx).is_err());
    }

    #[test]
    fn test_home_fetches_count() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        run(&ctx).unwrap();
        assert_eq!(backend.calls(), vec!["GET /notifications/unreaded"]);
    }
}
