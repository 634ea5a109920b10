//! Notifications view
//!
//! Showing an unread notification is what marks it read: every unread item
//! that gets rendered starts one background mark-read request. The set of
//! ids already handed to a task lives as long as the view, so re-rendering
//! never marks the same notification twice.

use anyhow::Result;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::app::AppContext;
use crate::models::Notification;
use crate::tasks::{self, TaskHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    pub notification_id: i64,
    pub error: String,
}

type MarkJob = Box<dyn FnOnce() -> Result<()> + Send>;
type MarkCallback = Box<dyn FnOnce(&Result<()>) + Send>;

/// Outcome of one render: the mark-read tasks that started, and the error
/// that stopped the rest, if any.
pub struct Rendered {
    pub handles: Vec<TaskHandle<()>>,
    pub error: Option<anyhow::Error>,
}

pub struct NotificationsView {
    ctx: AppContext,
    notifications: Vec<Notification>,
    marked: Arc<Mutex<HashSet<i64>>>,
    failures: Arc<Mutex<Vec<ReadFailure>>>,
}

impl NotificationsView {
    pub fn new(ctx: AppContext) -> Self {
        NotificationsView {
            ctx,
            notifications: Vec::new(),
            marked: Arc::new(Mutex::new(HashSet::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        match self.ctx.backend.notifications() {
            Ok(list) => {
                self.notifications = list;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load notifications");
                Err(e.into())
            }
        }
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    /// Unread as of the last load; marking does not move items between the
    /// two partitions until the next load.
    pub fn unread(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_read).collect()
    }

    pub fn read(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.is_read).collect()
    }

    /// Start a mark-read task for each unread notification not yet marked.
    pub fn render(&self) -> Rendered {
        self.render_with(|label, job, on_complete| tasks::spawn(label, job, on_complete))
    }

    /// `render` with the task starter supplied by the caller. An id only
    /// counts as marked once its task has started; the first failure to
    /// start stops the loop and comes back with the handles started so far.
    fn render_with<S>(&self, mut start: S) -> Rendered
    where
        S: FnMut(String, MarkJob, MarkCallback) -> Result<TaskHandle<()>>,
    {
        let mut rendered = Rendered {
            handles: Vec::new(),
            error: None,
        };
        let mut marked = match self.marked.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        for notification in self.unread() {
            let id = notification.id;
            if marked.contains(&id) {
                continue;
            }

            let backend = Arc::clone(&self.ctx.backend);
            let failures = Arc::clone(&self.failures);
            let job: MarkJob = Box::new(move || backend.mark_read(id).map_err(anyhow::Error::from));
            let on_complete: MarkCallback = Box::new(move |result: &Result<()>| {
                if let Err(e) = result {
                    if let Ok(mut failures) = failures.lock() {
                        failures.push(ReadFailure {
                            notification_id: id,
                            error: e.to_string(),
                        });
                    }
                }
            });

            match start(format!("mark-read-{}", id), job, on_complete) {
                Ok(handle) => {
                    marked.insert(id);
                    rendered.handles.push(handle);
                }
                Err(e) => {
                    tracing::error!(notification_id = id, error = %e, "failed to start mark-read task");
                    rendered.error = Some(e);
                    break;
                }
            }
        }
        rendered
    }

    pub fn is_marked(&self, id: i64) -> bool {
        self.marked.lock().map(|m| m.contains(&id)).unwrap_or(false)
    }

    pub fn failed_reads(&self) -> Vec<ReadFailure> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::setup_context;
    use crate::models::Role;
    use crate::tasks::wait_all;
    use proptest::prelude::*;

    #[test]
    fn test_partition_by_flag() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(1, false);
        backend.with_notification(2, true);
        backend.with_notification(3, false);

        let mut view = NotificationsView::new(ctx);
        view.load().unwrap();

        let unread: Vec<i64> = view.unread().iter().map(|n| n.id).collect();
        let read: Vec<i64> = view.read().iter().map(|n| n.id).collect();
        assert_eq!(unread, vec![1, 3]);
        assert_eq!(read, vec![2]);
    }

    #[test]
    fn test_render_marks_each_unread_once() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(1, false);
        backend.with_notification(2, true);
        backend.with_notification(3, false);

        let mut view = NotificationsView::new(ctx);
        view.load().unwrap();

        assert_eq!(wait_all(view.render().handles), 2);
        assert_eq!(wait_all(view.render().handles), 0);

        let state = backend.state();
        assert_eq!(state.mark_read_calls.get(&1), Some(&1));
        assert_eq!(state.mark_read_calls.get(&3), Some(&1));
        assert_eq!(state.mark_read_calls.get(&2), None);
    }

    #[test]
    fn test_reload_after_render_shows_read() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(5, false);

        let mut view = NotificationsView::new(ctx);
        view.load().unwrap();
        wait_all(view.render().handles);
        view.load().unwrap();

        assert!(view.unread().is_empty());
        assert_eq!(view.read().len(), 1);
        assert!(view.render().handles.is_empty());
    }

    #[test]
    fn test_failed_mark_is_reported_not_retried() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        backend.with_notification(9, false);
        backend.fail("POST /notifications/read/9");

        let mut view = NotificationsView::new(ctx);
        view.load().unwrap();
        assert_eq!(wait_all(view.render().handles), 0);
        assert_eq!(wait_all(view.render().handles), 0);

        let failures = view.failed_reads();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].notification_id, 9);
        assert!(view.is_marked(9));
    }

    #[test]
    fn test_failed_start_keeps_started_handles() {
        let (ctx, backend, _dir) = setup_context(Some(Role::Client));
        for id in 1..=3 {
            backend.with_notification(id, false);
        }
        let mut view = NotificationsView::new(ctx);
        view.load().unwrap();

        let mut started = 0;
        let rendered = view.render_with(|label, job, on_complete| {
            started += 1;
            if started == 2 {
                anyhow::bail!("thread limit reached");
            }
            tasks::spawn(label, job, on_complete)
        });

        assert!(rendered.error.is_some());
        assert_eq!(wait_all(rendered.handles), 1);
        assert!(view.is_marked(1));
        assert!(!view.is_marked(2));
        assert!(!view.is_marked(3));

        // the ids that never started go out on the next render
        let rendered = view.render();
        assert!(rendered.error.is_none());
        assert_eq!(wait_all(rendered.handles), 2);
        let state = backend.state();
        for id in 1..=3 {
            assert_eq!(state.mark_read_calls.get(&id), Some(&1));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_mark_read_exactly_once(
            flags in proptest::collection::vec(any::<bool>(), 0..10),
            renders in 1usize..4
        ) {
            let (ctx, backend, _dir) = setup_context(Some(Role::Client));
            for (i, is_read) in flags.iter().enumerate() {
                backend.with_notification(i as i64, *is_read);
            }
            let mut view = NotificationsView::new(ctx);
            view.load().unwrap();
            for _ in 0..renders {
                wait_all(view.render().handles);
            }

            let state = backend.state();
            for (i, is_read) in flags.iter().enumerate() {
                let calls = state.mark_read_calls.get(&(i as i64)).copied().unwrap_or(0);
                prop_assert_eq!(calls, if *is_read { 0 } else { 1 });
            }
        }
    }
}
