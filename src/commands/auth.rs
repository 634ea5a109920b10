use anyhow::Result;

use crate::app::AppContext;
use crate::views::auth;

pub fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let session = auth::login(ctx, email, password)?;
    println!(
        "Logged in as {} ({})",
        session.user.name,
        session.user.role.label()
    );
    Ok(())
}

pub fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let session = auth::register(ctx, name, email, password)?;
    println!("Registered and logged in as {}", session.user.name);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    if ctx.session.current().is_none() && !ctx.session.has_persisted_token()? {
        println!("Not logged in.");
        return Ok(());
    }
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}
