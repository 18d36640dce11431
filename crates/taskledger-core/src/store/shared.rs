//! Thread-safe handle to a task store.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{SortKey, TaskFilter, TaskStore};
use crate::domain::{NewTask, Task, TaskError, TaskId, TaskUpdate};
use crate::ports::{Clock, SystemClock};

/// A [`TaskStore`] behind a single lock.
///
/// The collection and the id counter are only consistent together, so every
/// operation takes the one lock for its whole duration. Results are owned
/// copies. Clones share the same store.
pub struct SharedTaskStore<C = SystemClock> {
    inner: Arc<Mutex<TaskStore<C>>>,
}

impl<C> Clone for SharedTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedTaskStore<C> {
    pub fn new(store: TaskStore<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut TaskStore<C>) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn add_task(&self, fields: NewTask) -> Result<TaskId, TaskError> {
        self.inner.lock().add_task(fields)
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task, TaskError> {
        self.inner.lock().get_task(id).cloned()
    }

    pub fn update_task(&self, id: TaskId, update: TaskUpdate) -> Result<(), TaskError> {
        self.inner.lock().update_task(id, update)
    }

    pub fn delete_task(&self, id: TaskId) -> Result<Task, TaskError> {
        self.inner.lock().delete_task(id)
    }

    pub fn toggle_completion(&self, id: TaskId) -> Result<bool, TaskError> {
        self.inner.lock().toggle_completion(id)
    }

    pub fn list_tasks(&self, filter: &TaskFilter, sort: SortKey) -> Vec<Task> {
        owned(self.inner.lock().list_tasks(filter, sort))
    }

    pub fn search_tasks(&self, query: &str) -> Vec<Task> {
        owned(self.inner.lock().search_tasks(query))
    }

    pub fn upcoming_tasks(&self, horizon_days: u32) -> Vec<Task> {
        owned(self.inner.lock().upcoming_tasks(horizon_days))
    }

    pub fn overdue_tasks(&self) -> Vec<Task> {
        owned(self.inner.lock().overdue_tasks())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

fn owned(tasks: Vec<&Task>) -> Vec<Task> {
    tasks.into_iter().cloned().collect()
}
