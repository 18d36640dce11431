//! Partial updates to a task.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::errors::ValidationError;
use super::priority::Priority;
use super::recurrence::Recurrence;

/// A value given either as the enumerated member or as free text.
///
/// Text is resolved when the update is applied, so `"HIGH"` and
/// `Priority::High` mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Spelled<T> {
    Value(T),
    Text(String),
}

impl Spelled<Priority> {
    pub fn resolve(self) -> Result<Priority, ValidationError> {
        match self {
            Spelled::Value(priority) => Ok(priority),
            Spelled::Text(text) => text.parse(),
        }
    }
}

impl Spelled<Recurrence> {
    /// Unrecognized text resolves to `Recurrence::None`.
    pub fn resolve(self) -> Recurrence {
        match self {
            Spelled::Value(recurrence) => recurrence,
            Spelled::Text(text) => Recurrence::from_spelling(&text),
        }
    }
}

impl From<Priority> for Spelled<Priority> {
    fn from(value: Priority) -> Self {
        Spelled::Value(value)
    }
}

impl From<Recurrence> for Spelled<Recurrence> {
    fn from(value: Recurrence) -> Self {
        Spelled::Value(value)
    }
}

impl<T> From<&str> for Spelled<T> {
    fn from(text: &str) -> Self {
        Spelled::Text(text.to_string())
    }
}

impl<T> From<String> for Spelled<T> {
    fn from(text: String) -> Self {
        Spelled::Text(text)
    }
}

/// The set of fields to change on a task. `None` leaves a field alone.
///
/// For the optional fields (`description`, `due_date`) the inner `Option`
/// is the new value, so `Some(None)` clears them.
///
/// Deserializing from a JSON object ignores keys that aren't task fields;
/// an explicit `null` clears `description` / `due_date`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    #[serde(deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Spelled<Priority>>,
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDateTime>>,
    pub recurrence: Option<Spelled<Recurrence>>,
}

/// A key that is present (even as `null`) becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Spelled<Priority>>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn with_recurrence(mut self, recurrence: impl Into<Spelled<Recurrence>>) -> Self {
        self.recurrence = Some(recurrence.into());
        self
    }

    /// Does this update mark the task as completed?
    pub fn marks_completed(&self) -> bool {
        self.completed == Some(true)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
