//! The Task entity.
//!
//! A `Task` is only ever built through [`Task::new`] and only ever changed
//! through [`Task::toggle_completion`] and [`Task::update_attributes`], so the
//! invariants checked by [`Task::validate`] hold for every value that exists.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::errors::ValidationError;
use super::ids::TaskId;
use super::priority::Priority;
use super::recurrence::Recurrence;
use super::update::TaskUpdate;

/// Caller-supplied fields for a new task. Everything but the title has a
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDateTime>,
    pub recurrence: Recurrence,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// A unit of trackable work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    completed: bool,
    priority: Priority,
    tags: Vec<String>,
    due_date: Option<NaiveDateTime>,
    recurrence: Recurrence,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Task {
    /// Build and validate a task. `created_at` and `updated_at` are both `now`.
    pub fn new(id: TaskId, fields: NewTask, now: NaiveDateTime) -> Result<Self, ValidationError> {
        let task = Self {
            id,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
            priority: fields.priority,
            tags: fields.tags,
            due_date: fields.due_date,
            recurrence: fields.recurrence,
            created_at: now,
            updated_at: now,
        };
        task.validate()?;
        Ok(task)
    }

    /// Check the invariants that the type system doesn't already guarantee.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flip completion and return the new value.
    pub fn toggle_completion(&mut self, now: NaiveDateTime) -> bool {
        self.completed = !self.completed;
        self.updated_at = now;
        self.completed
    }

    /// Apply the fields named in `update`, then re-validate.
    ///
    /// All-or-nothing: the update is applied to a copy, and `self` is only
    /// replaced when the copy validates. On error `self` is untouched,
    /// including `updated_at`.
    pub fn update_attributes(
        &mut self,
        update: TaskUpdate,
        now: NaiveDateTime,
    ) -> Result<(), ValidationError> {
        let mut candidate = self.clone();
        if let Some(title) = update.title {
            candidate.title = title;
        }
        if let Some(description) = update.description {
            candidate.description = description;
        }
        if let Some(completed) = update.completed {
            candidate.completed = completed;
        }
        if let Some(priority) = update.priority {
            candidate.priority = priority.resolve()?;
        }
        if let Some(tags) = update.tags {
            candidate.tags = tags;
        }
        if let Some(due_date) = update.due_date {
            candidate.due_date = due_date;
        }
        if let Some(recurrence) = update.recurrence {
            candidate.recurrence = recurrence.resolve();
        }
        candidate.updated_at = now;
        candidate.validate()?;

        *self = candidate;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: TaskId) {
        self.id = id;
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn due_date(&self) -> Option<NaiveDateTime> {
        self.due_date
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Copy the schedule-independent fields into a fresh draft.
    pub(crate) fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            priority: self.priority,
            tags: self.tags.clone(),
            due_date: self.due_date,
            recurrence: self.recurrence,
        }
    }
}
