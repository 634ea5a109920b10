use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::models::{Comment, Status, Ticket};
use crate::views::comments::CommentsSection;
use crate::views::tickets::TicketListView;

pub fn run(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;
    let mut view = TicketListView::new(ctx.clone());
    view.mount()?;

    let ticket = match view.ticket(id) {
        Some(t) => t,
        None => bail!("Ticket #{} not found", id),
    };

    let assignee = ticket
        .assigned_to_id
        .map(|op| view.operator_name(op).map(str::to_string).unwrap_or_else(|| format!("#{}", op)));
    print!("{}", format_card(ticket, assignee.as_deref()));

    if view.controls().change_status {
        if let Some(hint) = next_hint(ticket.status) {
            println!("{}", hint);
        }
    }

    let mut comments = CommentsSection::new(ctx.clone(), id);
    comments.expand()?;
    println!();
    if comments.comments().is_empty() {
        println!("Comments: (none)");
    } else {
        println!("Comments:");
        for comment in comments.comments() {
            println!("{}", format_comment(comment));
        }
    }

    Ok(())
}

pub fn format_card(ticket: &Ticket, assignee: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Ticket #{}: {}\n", ticket.id, ticket.title));
    out.push_str(&format!("Status: {}\n", status_line(ticket.status)));
    out.push_str(&format!("Priority: {}\n", ticket.priority.label()));
    if let Some(category) = &ticket.category {
        out.push_str(&format!("Category: {}\n", category.name));
    }
    if let Some(name) = assignee {
        out.push_str(&format!("Assigned to: {}\n", name));
    }

    if !ticket.description.is_empty() {
        out.push_str("\nDescription:\n");
        for line in ticket.description.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    if !ticket.attachments.is_empty() {
        out.push_str("\nAttachments:\n");
        for file in &ticket.attachments {
            out.push_str(&format!("  {} ({})\n", file.file_name, file.file_path));
        }
    }
    out
}

/// Usual next statuses for staff. Any status can still be set.
pub fn next_hint(status: Status) -> Option<String> {
    if status.is_terminal() {
        return Some(format!("{} is final; reopen with: ticketdesk status <id> NEW", status.label()));
    }
    let next = status.suggested_next();
    if next.is_empty() {
        return None;
    }
    let names: Vec<&str> = next.iter().map(|s| s.as_str()).collect();
    Some(format!("Next: {}", names.join(", ")))
}

fn status_line(status: Status) -> String {
    format!("{} ({})", status.label(), status.as_str())
}

pub fn format_comment(comment: &Comment) -> String {
    format!(
        "  [{}] {}: {}",
        comment.created_at.format("%Y-%m-%d %H:%M"),
        comment.author.name,
        comment.content
    )
}
