use anyhow::Result;

use crate::app::AppContext;

pub fn categories(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    let categories = ctx.backend.categories().map_err(|e| {
        tracing::error!(error = %e, "failed to load categories");
        e
    })?;

    if categories.is_empty() {
        println!("No categories defined.");
    }
    for c in categories {
        println!("{:>4}  {}", c.id, c.name);
    }
    Ok(())
}

pub fn operators(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    let operators = ctx.backend.operators().map_err(|e| {
        tracing::error!(error = %e, "failed to load operators");
        e
    })?;

    if operators.is_empty() {
        println!("No operators available.");
    }
    for o in operators {
        match &o.email {
            Some(email) => println!("{:>4}  {} <{}>", o.id, o.name, email),
            None => println!("{:>4}  {}", o.id, o.name),
        }
    }
    Ok(())
}
