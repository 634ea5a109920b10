use anyhow::Result;

use crate::app::AppContext;
use crate::models::Notification;
use crate::tasks;
use crate::views::notifications::NotificationsView;

pub fn format_notification(n: &Notification) -> String {
    format!(
        "  [{}] {}: {}",
        n.created_at.format("%Y-%m-%d %H:%M"),
        n.kind.label(),
        n.message
    )
}

pub fn run(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    let mut view = NotificationsView::new(ctx.clone());
    view.load()?;

    let unread = view.unread();
    let read = view.read();

    println!("Unread ({})", unread.len());
    if unread.is_empty() {
        println!("  Nothing new.");
    }
    for n in &unread {
        println!("{}", format_notification(n));
    }

    println!("\nRead ({})", read.len());
    if read.is_empty() {
        println!("  No history yet.");
    }
    for n in &read {
        println!("{}", format_notification(n));
    }

    // everything printed above counts as seen
    let rendered = view.render();
    let started = rendered.handles.len();
    let marked = tasks::wait_all(rendered.handles);
    if marked < started {
        for failure in view.failed_reads() {
            eprintln!(
                "Warning: could not mark notification {} as read: {}",
                failure.notification_id, failure.error
            );
        }
    }
    match rendered.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::setup_context;
    use crate::models::{NotificationType, Role};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_run_marks_unread() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(1, false);
        backend.with_notification(2, true);

        run(&ctx).unwrap();

        let state = backend.state();
        assert!(state.notifications.iter().all(|n| n.is_read));
        assert_eq!(state.mark_read_calls.len(), 1);
    }

    #[test]
    fn test_run_survives_mark_failure() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(1, false);
        backend.fail("POST /notifications/read/1");

        assert!(run(&ctx).is_ok());
    }

    #[test]
    fn test_format_notification() {
        let n = Notification {
            id: 1,
            kind: NotificationType::Assigned,
            message: "Ticket #17 assigned to Olga".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 2, 14, 5, 0).unwrap(),
            is_read: false,
        };
        assert_eq!(
            format_notification(&n),
            "  [2026-10-02 14:05] Assignee set: Ticket #17 assigned to Olga"
        );
    }
}
