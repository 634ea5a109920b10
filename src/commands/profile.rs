use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::views::profile::{EditProfileForm, ProfileView};

pub fn show(ctx: &AppContext) -> Result<()> {
    let view = ProfileView::new(ctx.clone());
    let user = match view.user() {
        Some(u) => u,
        None => bail!("Not logged in. Run 'ticketdesk login' first."),
    };

    println!("Name:  {}", user.name);
    println!("Email: {}", user.email);
    println!("Role:  {}", user.role.label());
    println!();
    for action in view.actions() {
        println!("{:<14} {}", action.label(), action.command());
    }
    Ok(())
}

pub fn edit(
    ctx: &AppContext,
    name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    if name.is_none() && email.is_none() && password.is_none() {
        bail!("Nothing to update. Use --name, --email, or --password");
    }

    let mut form = EditProfileForm::new(ctx.clone())?;
    if let Some(n) = name {
        form.name = n.to_string();
    }
    if let Some(e) = email {
        form.email = e.to_string();
    }
    if let Some(p) = password {
        form.password = p.to_string();
    }

    let user = form.submit()?;
    println!("Updated profile for {} <{}>", user.name, user.email);
    Ok(())
}
