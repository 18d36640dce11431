//! In-memory task store.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info};

use super::{SortKey, StoreConfig, TaskFilter};
use crate::domain::{NewTask, Task, TaskError, TaskId, TaskUpdate};
use crate::ports::{Clock, SystemClock};
use crate::recurrence;

/// The authoritative collection of tasks.
///
/// Design:
/// - Owns every `Task` exclusively; callers get shared references or copies.
/// - All mutation goes through `Task::update_attributes` /
///   `Task::toggle_completion`, so invariants are checked in one place.
/// - Ids come from a per-store counter starting at 1 and are never reused,
///   even after deletion. Independent stores never share counters.
/// - Completing a recurring task (false -> true) inserts its successor.
pub struct TaskStore<C = SystemClock> {
    /// Keyed by id, so iteration is id order.
    tasks: BTreeMap<TaskId, Task>,

    /// Next id to hand out.
    next_id: TaskId,

    clock: C,
    config: StoreConfig,
}

impl TaskStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(clock, StoreConfig::default())
    }

    pub fn with_config(clock: C, config: StoreConfig) -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: TaskId::new(1),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Allocate the next TaskId.
    fn allocate_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// The id the next successful insert will receive.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Create a task and return its id.
    ///
    /// Validation runs before an id is allocated, so a rejected task does
    /// not use up an id.
    pub fn add_task(&mut self, fields: NewTask) -> Result<TaskId, TaskError> {
        let task = Task::new(self.next_id, fields, self.clock.now())?;
        let id = self.allocate_id();
        debug!(task_id = %id, title = task.title(), "task added");
        self.tasks.insert(id, task);
        Ok(id)
    }

    pub fn get_task(&self, id: TaskId) -> Result<&Task, TaskError> {
        self.tasks.get(&id).ok_or(TaskError::NotFound(id))
    }

    /// Apply `update` to a task.
    ///
    /// If the update sets `completed = true` on a task that was incomplete
    /// and repeats, the next occurrence is inserted as a new task.
    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> Result<(), TaskError> {
        let now = self.clock.now();
        let marks_completed = update.marks_completed();
        let task = self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        let was_completed = task.is_completed();

        task.update_attributes(update, now)?;
        debug!(task_id = %id, "task updated");

        if marks_completed && !was_completed {
            self.spawn_successor(id, now);
        }
        Ok(())
    }

    /// Remove a task and hand it back.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let task = self.tasks.remove(&id).ok_or(TaskError::NotFound(id))?;
        debug!(task_id = %id, "task deleted");
        Ok(task)
    }

    /// Flip completion and return the new value. Completing a recurring
    /// task inserts its next occurrence, as with `update_task`.
    pub fn toggle_completion(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let now = self.clock.now();
        let task = self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        let completed = task.toggle_completion(now);
        debug!(task_id = %id, completed, "task completion toggled");

        if completed {
            self.spawn_successor(id, now);
        }
        Ok(completed)
    }

    /// Insert the next occurrence of `source`, if it has one.
    fn spawn_successor(&mut self, source: TaskId, now: NaiveDateTime) -> Option<TaskId> {
        let mut successor = recurrence::create_next_occurrence(self.tasks.get(&source)?, now)?;
        let id = self.allocate_id();
        successor.assign_id(id);
        info!(
            task_id = %source,
            successor_id = %id,
            recurrence = %successor.recurrence(),
            due_date = ?successor.due_date(),
            "scheduled next occurrence"
        );
        self.tasks.insert(id, successor);
        Some(id)
    }

    /// Tasks matching every criterion in `filter`, ordered by `sort`.
    pub fn list_tasks(&self, filter: &TaskFilter, sort: SortKey) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.iter().filter(|t| filter.matches(t)).collect();
        sort.sort(&mut tasks);
        tasks
    }

    /// Tasks whose title or description contains `query`, ignoring case.
    /// An empty query matches nothing.
    pub fn search_tasks(&self, query: &str) -> Vec<&Task> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.iter()
            .filter(|t| {
                t.title().to_lowercase().contains(&needle)
                    || t.description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Incomplete tasks due within `[now, now + horizon_days]`.
    pub fn upcoming_tasks(&self, horizon_days: u32) -> Vec<&Task> {
        let now = self.clock.now();
        let until = now
            .checked_add_signed(Duration::days(i64::from(horizon_days)))
            .unwrap_or(NaiveDateTime::MAX);
        self.open_tasks_due(|due| now <= due && due <= until)
    }

    /// `upcoming_tasks` with the configured horizon.
    pub fn upcoming_tasks_default(&self) -> Vec<&Task> {
        self.upcoming_tasks(self.config.upcoming_horizon_days)
    }

    /// Incomplete tasks due strictly before now.
    pub fn overdue_tasks(&self) -> Vec<&Task> {
        let now = self.clock.now();
        self.open_tasks_due(|due| due < now)
    }

    fn open_tasks_due(&self, window: impl Fn(NaiveDateTime) -> bool) -> Vec<&Task> {
        self.iter()
            .filter(|t| !t.is_completed() && t.due_date().is_some_and(&window))
            .collect()
    }
}
