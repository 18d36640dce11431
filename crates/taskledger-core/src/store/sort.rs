//! Sort orders for task listings.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::domain::Task;

/// How to order a listing. Every order is stable, so ties keep id order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending id.
    #[default]
    Id,
    /// Earliest due first, undated last.
    DueDateAsc,
    /// Latest due first, undated still last.
    DueDateDesc,
    /// High, then Medium, then Low.
    Priority,
    /// Case-insensitive title.
    Title,
}

impl SortKey {
    /// Map a key name (`due_date_asc`, `due_date_desc`, `priority`,
    /// `title`) to a sort order. Unrecognized names fall back to `Id`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "due_date_asc" => SortKey::DueDateAsc,
            "due_date_desc" => SortKey::DueDateDesc,
            "priority" => SortKey::Priority,
            "title" => SortKey::Title,
            _ => SortKey::Id,
        }
    }

    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Id => a.id().cmp(&b.id()),
            SortKey::DueDateAsc => undated_last(a.due_date(), b.due_date(), |x, y| x.cmp(&y)),
            SortKey::DueDateDesc => undated_last(a.due_date(), b.due_date(), |x, y| y.cmp(&x)),
            SortKey::Priority => a.priority().rank().cmp(&b.priority().rank()),
            SortKey::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        }
    }

    /// Stable in-place sort.
    pub fn sort(self, tasks: &mut [&Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

impl From<&str> for SortKey {
    fn from(name: &str) -> Self {
        SortKey::from_name(name)
    }
}

fn undated_last(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    dated: impl Fn(NaiveDateTime, NaiveDateTime) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => dated(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Priority, TaskId};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn tasks() -> Vec<Task> {
        let specs = [
            NewTask::new("banana").with_priority(Priority::Low).with_due_date(day(3)),
            NewTask::new("Apple"),
            NewTask::new("cherry").with_priority(Priority::High).with_due_date(day(1)),
            NewTask::new("apple pie").with_priority(Priority::Low),
            NewTask::new("date").with_due_date(day(3)),
        ];
        specs
            .into_iter()
            .enumerate()
            .map(|(i, fields)| Task::new(TaskId::new(i as u64 + 1), fields, day(1)).unwrap())
            .collect()
    }

    fn sorted_ids(key: SortKey) -> Vec<u64> {
        let all = tasks();
        let mut refs: Vec<&Task> = all.iter().collect();
        key.sort(&mut refs);
        refs.iter().map(|t| t.id().get()).collect()
    }

    #[rstest]
    #[case::id(SortKey::Id, vec![1, 2, 3, 4, 5])]
    #[case::due_asc(SortKey::DueDateAsc, vec![3, 1, 5, 2, 4])]
    #[case::due_desc(SortKey::DueDateDesc, vec![1, 5, 3, 2, 4])]
    #[case::priority(SortKey::Priority, vec![3, 2, 5, 1, 4])]
    #[case::title(SortKey::Title, vec![2, 4, 1, 3, 5])]
    fn orders_are_stable(#[case] key: SortKey, #[case] expected: Vec<u64>) {
        assert_eq!(sorted_ids(key), expected);
    }

    #[rstest]
    #[case("due_date_asc", SortKey::DueDateAsc)]
    #[case("due_date_desc", SortKey::DueDateDesc)]
    #[case("priority", SortKey::Priority)]
    #[case("title", SortKey::Title)]
    #[case("colour", SortKey::Id)]
    #[case("", SortKey::Id)]
    fn names_map_to_keys(#[case] name: &str, #[case] expected: SortKey) {
        assert_eq!(SortKey::from(name), expected);
    }
}
