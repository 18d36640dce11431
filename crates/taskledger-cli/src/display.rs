//! Human-readable task rendering.

use taskledger_core::domain::Task;

/// One line summary, plus an indented description line when present:
///
/// ```text
/// [ ] [3] Pay rent (Priority: High, Tags: home, bills, Due: 2024-02-01 09:00, Repeats: monthly)
///     Description: transfer before noon
/// ```
pub fn format_task(task: &Task) -> String {
    let status = if task.is_completed() { "[✓]" } else { "[ ]" };

    let mut details = vec![format!("Priority: {}", task.priority())];
    if !task.tags().is_empty() {
        details.push(format!("Tags: {}", task.tags().join(", ")));
    }
    if let Some(due) = task.due_date() {
        details.push(format!("Due: {}", due.format("%Y-%m-%d %H:%M")));
    }
    if task.recurrence().is_recurring() {
        details.push(format!("Repeats: {}", task.recurrence()));
    }

    let mut line = format!(
        "{status} [{}] {} ({})",
        task.id(),
        task.title(),
        details.join(", ")
    );
    if let Some(description) = task.description() {
        line.push_str(&format!("\n    Description: {description}"));
    }
    line
}
