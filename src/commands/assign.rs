use anyhow::{bail, Result};

use crate::app::AppContext;
use crate::models::Operator;
use crate::views::tickets::TicketListView;

/// Match an operator by id or by (case-insensitive) name.
pub fn resolve_operator<'a>(operators: &'a [Operator], key: &str) -> Option<&'a Operator> {
    let key = key.trim();
    match key.parse::<i64>() {
        Ok(id) => operators.iter().find(|o| o.id == id),
        Err(_) => operators.iter().find(|o| o.name.eq_ignore_ascii_case(key)),
    }
}

pub fn run(ctx: &AppContext, id: i64, operator: &str) -> Result<()> {
    ctx.require_user()?;
    let mut view = TicketListView::new(ctx.clone());
    view.mount()?;

    if !view.controls().assign {
        bail!("Only administrators can assign tickets");
    }

    let (operator_id, name) = match resolve_operator(view.operators(), operator) {
        Some(o) => (o.id, o.name.clone()),
        None => {
            let names: Vec<String> = view
                .operators()
                .iter()
                .map(|o| format!("{} ({})", o.name, o.id))
                .collect();
            bail!(
                "Unknown operator '{}'. Available: {}",
                operator,
                names.join(", ")
            );
        }
    };

    view.assign(id, operator_id)?;
    println!("Assigned ticket #{} to {}", id, name);
    Ok(())
}
