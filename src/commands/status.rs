use anyhow::Result;

use crate::app::AppContext;
use crate::models::Status;
use crate::views::tickets::TicketListView;

pub fn run(ctx: &AppContext, id: i64, status: &str) -> Result<()> {
    ctx.require_user()?;
    let status: Status = status.parse()?;

    let mut view = TicketListView::new(ctx.clone());
    view.mount()?;
    view.change_status(id, status)?;

    match view.ticket(id) {
        Some(t) => println!("Ticket #{} is now {}", id, t.status.label()),
        // operators lose sight of tickets no longer assigned to them
        None => println!("Set ticket #{} to {}", id, status.label()),
    }
    Ok(())
}
