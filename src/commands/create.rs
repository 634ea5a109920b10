use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::models::Priority;
use crate::views::create_ticket::CreateTicketModal;

pub fn parse_incident_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid incident date '{}'. Use YYYY-MM-DD", s))
}

pub fn run(
    ctx: &AppContext,
    title: &str,
    description: &str,
    category: &str,
    priority: Option<&str>,
    incident_date: Option<&str>,
    files: &[PathBuf],
) -> Result<()> {
    ctx.require_user()?;

    let priority = match priority {
        Some(p) => p.parse::<Priority>()?,
        None => Priority::default(),
    };
    let incident_date = incident_date.map(parse_incident_date).transpose()?;

    let mut modal = CreateTicketModal::new(ctx.clone());
    modal.open()?;

    let category_id = match modal.find_category(category) {
        Some(c) => c.id,
        None => {
            let names: Vec<String> = modal
                .categories()
                .iter()
                .map(|c| format!("{} ({})", c.name, c.id))
                .collect();
            bail!(
                "Unknown category '{}'. Available: {}",
                category,
                names.join(", ")
            );
        }
    };

    modal.draft.title = title.to_string();
    modal.draft.description = description.to_string();
    modal.draft.category_id = Some(category_id);
    modal.draft.priority = priority;
    modal.draft.incident_date = incident_date;
    for file in files {
        modal.attach(file.clone());
    }

    modal.submit()?;
    if files.is_empty() {
        println!("Created ticket \"{}\"", title);
    } else {
        println!("Created ticket \"{}\" with {} attachment(s)", title, files.len());
    }
    Ok(())
}
