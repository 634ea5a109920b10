use anyhow::Result;
use std::io::{self, Write};

use crate::app::AppContext;
use crate::models::Ticket;
use crate::views::tickets::TicketListView;

fn prompt(id: i64, ticket: Option<&Ticket>) -> bool {
    match ticket {
        Some(t) => print!("Delete ticket #{} \"{}\"? [y/N] ", id, t.title),
        None => print!("Delete ticket #{}? [y/N] ", id),
    }
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

pub fn run(ctx: &AppContext, id: i64, force: bool) -> Result<()> {
    ctx.require_user()?;
    let mut view = TicketListView::new(ctx.clone());
    view.mount()?;

    let deleted = if force {
        view.delete(id, |_, _| true)?
    } else {
        view.delete(id, prompt)?
    };

    if deleted {
        println!("Deleted ticket #{}", id);
        println!("{} ticket(s) remaining", view.tickets().len());
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

/// Internal function for testing without stdin interaction
#[cfg(test)]
pub fn run_force(ctx: &AppContext, id: i64) -> Result<()> {
    run(ctx, id, true)
}
