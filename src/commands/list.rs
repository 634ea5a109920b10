use anyhow::Result;

use crate::app::AppContext;
use crate::models::Ticket;
use crate::views::tickets::TicketListView;

pub fn run(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    let mut view = TicketListView::new(ctx.clone());
    view.mount()?;

    println!("{}", view.heading());
    if view.tickets().is_empty() {
        println!("No tickets yet.");
        return Ok(());
    }

    for ticket in view.tickets() {
        let assignee = ticket
            .assigned_to_id
            .map(|id| view.operator_name(id).map(str::to_string).unwrap_or_else(|| format!("#{}", id)));
        println!("{}", format_line(ticket, assignee.as_deref()));
    }

    let controls = view.controls();
    if controls.change_status || controls.assign {
        println!();
        if controls.change_status {
            println!("Change status: ticketdesk status <id> <STATUS>");
        }
        if controls.assign {
            println!("Assign:        ticketdesk assign <id> <operator>");
        }
    }

    Ok(())
}

pub fn format_line(ticket: &Ticket, assignee: Option<&str>) -> String {
    let status_display = format!("[{}]", ticket.status);
    let category = ticket
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let mut line = format!(
        "#{:<4} {:13} {:<40} {:8} {}",
        ticket.id,
        status_display,
        truncate(&ticket.title, 40),
        ticket.priority.label(),
        truncate(category, 20)
    );
    if let Some(name) = assignee {
        line.push_str(&format!("  -> {}", name));
    }
    line
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
