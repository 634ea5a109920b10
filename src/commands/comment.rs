use anyhow::Result;

use crate::app::AppContext;
use crate::commands::show::format_comment;
use crate::views::comments::{self, CommentsSection};

pub fn add(ctx: &AppContext, ticket_id: i64, text: &str) -> Result<()> {
    ctx.require_user()?;
    let mut section = CommentsSection::new(ctx.clone(), ticket_id);
    if section.post(text)? {
        println!(
            "Added comment to ticket #{} ({} total)",
            ticket_id,
            section.comments().len()
        );
    } else {
        println!("Nothing to post: comment is empty.");
    }
    Ok(())
}

pub fn list(ctx: &AppContext, ticket_id: i64) -> Result<()> {
    ctx.require_user()?;
    let mut section = CommentsSection::new(ctx.clone(), ticket_id);
    section.expand()?;

    if section.comments().is_empty() {
        println!("No comments on ticket #{}.", ticket_id);
        return Ok(());
    }
    for comment in section.comments() {
        println!("{}", format_comment(comment));
    }
    Ok(())
}

pub fn list_all(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    let grouped = comments::load_all(ctx)?;

    if grouped.is_empty() {
        println!("No comments yet.");
        return Ok(());
    }
    for (ticket_id, thread) in &grouped {
        println!("Ticket #{}:", ticket_id);
        for comment in thread {
            println!("{}", format_comment(comment));
        }
    }
    Ok(())
}
