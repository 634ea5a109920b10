//! Background tasks
//!
//! Mutations that should not block the caller (marking a notification read,
//! for instance) run on their own named thread. The outcome always reaches
//! a completion callback and is logged on failure; the returned handle can
//! be waited on.

use anyhow::{Context, Result};
use std::thread::{self, JoinHandle};

pub struct TaskHandle<T> {
    label: String,
    handle: JoinHandle<Option<T>>,
}

impl<T> TaskHandle<T> {
    /// Block until the task ends. `None` if it failed or panicked.
    pub fn wait(self) -> Option<T> {
        match self.handle.join() {
            Ok(value) => value,
            Err(_) => {
                tracing::error!(task = %self.label, "task panicked");
                None
            }
        }
    }
}

pub fn spawn<T, F, C>(label: impl Into<String>, job: F, on_complete: C) -> Result<TaskHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
    C: FnOnce(&Result<T>) + Send + 'static,
{
    let label = label.into();
    let thread_label = label.clone();
    let handle = thread::Builder::new()
        .name(label.clone())
        .spawn(move || {
            let result = job();
            if let Err(e) = &result {
                tracing::warn!(task = %thread_label, error = %e, "background task failed");
            }
            on_complete(&result);
            result.ok()
        })
        .with_context(|| format!("Failed to start task {}", label))?;

    Ok(TaskHandle { label, handle })
}

/// Wait for every handle, returning how many succeeded.
pub fn wait_all<T>(handles: Vec<TaskHandle<T>>) -> usize {
    handles.into_iter().filter_map(TaskHandle::wait).count()
}
