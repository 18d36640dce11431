//! Recurrence engine: next due dates and successor tasks.
//!
//! # 責務
//! - 次回の期限日を計算する（月末は丸める: 1/31 → 2/28 or 2/29）
//! - 後続タスクを組み立てる（ID の割り当てはストアが行う）

use chrono::{Days, Months, NaiveDateTime};

use crate::domain::{Recurrence, Task, TaskId};

/// Advance `due` by one step of `recurrence`.
///
/// - `Daily`: +1 calendar day
/// - `Weekly`: +7 calendar days
/// - `Monthly`: same day next month, clamped to that month's last day
///   (Jan 31 -> Feb 28/29, Dec 15 -> Jan 15 of the next year)
///
/// Time of day is kept. Returns `None` for `Recurrence::None` or when the
/// result is out of chrono's range.
pub fn advance(due: NaiveDateTime, recurrence: Recurrence) -> Option<NaiveDateTime> {
    match recurrence {
        Recurrence::None => None,
        Recurrence::Daily => due.checked_add_days(Days::new(1)),
        Recurrence::Weekly => due.checked_add_days(Days::new(7)),
        Recurrence::Monthly => due.checked_add_months(Months::new(1)),
    }
}

/// When the task is next due, if it repeats and has a due date.
pub fn next_occurrence(task: &Task) -> Option<NaiveDateTime> {
    let due = task.due_date()?;
    advance(due, task.recurrence())
}

/// Build the follow-up of a recurring task.
///
/// The successor copies title, description, priority, tags and recurrence,
/// starts incomplete, is due at [`next_occurrence`], and carries
/// `TaskId::PLACEHOLDER` until the store assigns a real id. `now` becomes its
/// `created_at` / `updated_at`.
pub fn create_next_occurrence(task: &Task, now: NaiveDateTime) -> Option<Task> {
    if !task.recurrence().is_recurring() {
        return None;
    }
    let next_due = next_occurrence(task)?;

    let mut fields = task.to_new_task();
    fields.completed = false;
    fields.due_date = Some(next_due);
    // The source task already passed validation and the title is unchanged.
    Task::new(TaskId::PLACEHOLDER, fields, now).ok()
}
