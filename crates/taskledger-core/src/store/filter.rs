//! List filters.

use chrono::NaiveDateTime;

use crate::domain::{Priority, Task, ValidationError};

/// Criteria for [`TaskStore::list_tasks`](super::TaskStore::list_tasks).
///
/// Every criterion that is set must match (logical AND). An empty filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// Exact tag the task must carry.
    pub tag: Option<String>,
    /// Inclusive lower bound on the due date.
    pub due_date_from: Option<NaiveDateTime>,
    /// Inclusive upper bound on the due date.
    pub due_date_to: Option<NaiveDateTime>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Filter on a priority given by name, e.g. `"high"`.
    pub fn with_priority_named(self, name: &str) -> Result<Self, ValidationError> {
        Ok(self.with_priority(name.parse()?))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_due_date_from(mut self, from: NaiveDateTime) -> Self {
        self.due_date_from = Some(from);
        self
    }

    pub fn with_due_date_to(mut self, to: NaiveDateTime) -> Self {
        self.due_date_to = Some(to);
        self
    }

    fn has_due_range(&self) -> bool {
        self.due_date_from.is_some() || self.due_date_to.is_some()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.completed.is_some_and(|c| c != task.is_completed()) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority()) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !task.has_tag(tag) {
                return false;
            }
        }
        if self.has_due_range() {
            // Undated tasks never fall inside a date range.
            let Some(due) = task.due_date() else {
                return false;
            };
            if self.due_date_from.is_some_and(|from| due < from) {
                return false;
            }
            if self.due_date_to.is_some_and(|to| due > to) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, TaskId};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn task(fields: NewTask) -> Task {
        Task::new(TaskId::new(1), fields, day(1)).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(TaskFilter::new().matches(&task(NewTask::new("a"))));
    }

    #[test]
    fn criteria_are_anded() {
        let filter = TaskFilter::new()
            .with_completed(false)
            .with_priority(Priority::High);
        assert!(filter.matches(&task(NewTask::new("a").with_priority(Priority::High))));
        assert!(!filter.matches(&task(NewTask::new("b").with_priority(Priority::Low))));
        assert!(!filter.matches(&task(
            NewTask::new("c")
                .with_priority(Priority::High)
                .with_completed(true)
        )));
    }

    #[test]
    fn tag_must_match_exactly() {
        let t = task(NewTask::new("a").with_tags(["work", "urgent"]));
        assert!(TaskFilter::new().with_tag("urgent").matches(&t));
        assert!(!TaskFilter::new().with_tag("Urgent").matches(&t));
        assert!(!TaskFilter::new().with_tag("home").matches(&t));
    }

    #[test]
    fn priority_can_be_named() {
        let filter = TaskFilter::new().with_priority_named("low").unwrap();
        assert_eq!(filter.priority, Some(Priority::Low));
        assert!(TaskFilter::new().with_priority_named("meh").is_err());
    }

    #[rstest]
    #[case::inside(Some(day(10)), true)]
    #[case::on_lower_bound(Some(day(5)), true)]
    #[case::on_upper_bound(Some(day(15)), true)]
    #[case::before(Some(day(4)), false)]
    #[case::after(Some(day(16)), false)]
    #[case::undated(None, false)]
    fn due_range_is_inclusive(#[case] due: Option<NaiveDateTime>, #[case] expected: bool) {
        let mut fields = NewTask::new("a");
        fields.due_date = due;
        let filter = TaskFilter::new()
            .with_due_date_from(day(5))
            .with_due_date_to(day(15));
        assert_eq!(filter.matches(&task(fields)), expected);
    }

    #[test]
    fn single_bound_still_excludes_undated() {
        let undated = task(NewTask::new("a"));
        assert!(!TaskFilter::new().with_due_date_from(day(1)).matches(&undated));
        assert!(!TaskFilter::new().with_due_date_to(day(30)).matches(&undated));
    }
}
