//! Line-oriented command console over a task store.
//!
//! Every line is one command. Failures are reported to the user and the
//! console keeps going; only I/O errors on the output stop it.

use std::io::Write;

use taskledger_core::prelude::*;
use tracing::{debug, warn};

use crate::display::format_task;
use crate::input::{InputError, parse_due_date, parse_flag_value, sanitize};

const HELP: &str = "\
Commands:
  add <title> [--priority=high|medium|low] [--tags=a,b] [--due=DATE]
              [--repeat=daily|weekly|monthly] [--desc=TEXT]
  list [--completed|--incomplete] [--priority=P] [--tag=T] [--from=DATE] [--to=DATE]
       [--sort=id|due|due-desc|priority|title]
  view <id>
  update <id> field=value ...   (title, description, priority, tags, due, completed, recurrence)
  delete <id>
  done <id>                     toggle completion
  search <query>
  overdue
  upcoming [days]
  help
  quit";

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<C: Clock, W: Write> {
    store: TaskStore<C>,
    out: W,
    json: bool,
}

impl<C: Clock, W: Write> Console<C, W> {
    pub fn new(store: TaskStore<C>, out: W) -> Self {
        Self {
            store,
            out,
            json: false,
        }
    }

    /// Print listings as JSON instead of text.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    pub fn help(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{HELP}")
    }

    /// Handle one input line.
    pub fn execute(&mut self, raw: &str) -> std::io::Result<Flow> {
        let line = sanitize(raw);
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        debug!(command, "console command");

        let result = match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "h" | "?" => self.help().map_err(InputError::from),
            "add" => self.add(rest),
            "list" | "ls" => self.list(rest),
            "view" | "show" => self.view(rest),
            "update" | "edit" => self.update(rest),
            "delete" | "remove" | "rm" => self.delete(rest),
            "done" | "complete" | "toggle" => self.toggle(rest),
            "search" | "find" => self.search(rest),
            "overdue" => self.overdue(),
            "upcoming" | "due" => self.upcoming(rest),
            other => Err(InputError::UnknownCommand(other.to_string())),
        };

        match result {
            Ok(()) => {}
            Err(InputError::Io(err)) => return Err(err),
            Err(err) => {
                warn!(command, error = %err, "command failed");
                writeln!(self.out, "Error: {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, args: &str) -> Result<(), InputError> {
        const USAGE: &str = "add <title> [--priority=P] [--tags=a,b] [--due=DATE] [--repeat=R] [--desc=TEXT]";
        // Words before the first flag are the title; later words continue
        // the value of the flag before them.
        let mut title = Vec::new();
        let mut flags: Vec<(&str, String)> = Vec::new();
        for token in args.split_whitespace() {
            if let Some(flag) = token.strip_prefix("--") {
                let (key, value) = flag.split_once('=').unwrap_or((flag, ""));
                flags.push((key, value.to_string()));
            } else if let Some((_, value)) = flags.last_mut() {
                append_word(value, token);
            } else {
                title.push(token);
            }
        }

        let mut fields = NewTask::default();
        for (key, value) in flags {
            match key {
                "priority" => fields.priority = value.parse().map_err(TaskError::from)?,
                "tags" => fields.tags = split_tags(&value),
                "due" => fields.due_date = Some(parse_due_date(&value)?),
                "repeat" | "recurrence" => fields.recurrence = Recurrence::from_spelling(&value),
                "desc" | "description" => fields.description = Some(value),
                _ => return Err(InputError::UnknownFlag(format!("--{key}"))),
            }
        }
        if title.is_empty() {
            return Err(InputError::Usage(USAGE));
        }
        fields.title = title.join(" ");

        let id = self.store.add_task(fields)?;
        writeln!(self.out, "Task added with ID: {id}")?;
        Ok(())
    }

    fn list(&mut self, args: &str) -> Result<(), InputError> {
        let mut filter = TaskFilter::new();
        let mut sort = SortKey::Id;

        for token in args.split_whitespace() {
            let flag = token
                .strip_prefix("--")
                .ok_or_else(|| InputError::UnknownFlag(token.to_string()))?;
            let (key, value) = flag.split_once('=').unwrap_or((flag, ""));
            match key {
                "completed" => filter = filter.with_completed(true),
                "incomplete" => filter = filter.with_completed(false),
                "priority" => filter = filter.with_priority_named(value).map_err(TaskError::from)?,
                "tag" => filter = filter.with_tag(value),
                "from" => filter = filter.with_due_date_from(parse_due_date(value)?),
                "to" => filter = filter.with_due_date_to(parse_due_date(value)?),
                "sort" => sort = sort_key(value),
                _ => return Err(InputError::UnknownFlag(token.to_string())),
            }
        }

        let tasks = self.store.list_tasks(&filter, sort);
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&tasks)?)?;
            return Ok(());
        }
        if tasks.is_empty() {
            writeln!(self.out, "No tasks found.")?;
            return Ok(());
        }
        writeln!(self.out, "Found {} task(s):", tasks.len())?;
        for task in tasks {
            writeln!(self.out, "{}", format_task(task))?;
        }
        Ok(())
    }

    fn view(&mut self, args: &str) -> Result<(), InputError> {
        let id = parse_id(args, "view <id>")?;
        let task = self.store.get_task(id)?;
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(task)?)?;
        } else {
            writeln!(self.out, "{}", format_task(task))?;
        }
        Ok(())
    }

    fn update(&mut self, args: &str) -> Result<(), InputError> {
        const USAGE: &str = "update <id> field=value ... (title, description, priority, tags, due, completed, recurrence)";
        let (id, assignments) = args.split_once(' ').ok_or(InputError::Usage(USAGE))?;
        let id = parse_id(id, USAGE)?;
        let update = parse_assignments(assignments)?;
        if update.is_empty() {
            return Err(InputError::Usage(USAGE));
        }

        let before = self.store.len();
        self.store.update_task(id, update)?;
        writeln!(self.out, "Task {id} updated.")?;
        self.report_successor(before)
    }

    fn delete(&mut self, args: &str) -> Result<(), InputError> {
        let id = parse_id(args, "delete <id>")?;
        let removed = self.store.delete_task(id)?;
        writeln!(self.out, "Task {id} ({}) deleted.", removed.title())?;
        Ok(())
    }

    fn toggle(&mut self, args: &str) -> Result<(), InputError> {
        let id = parse_id(args, "done <id>")?;
        let before = self.store.len();
        let completed = self.store.toggle_completion(id)?;
        let state = if completed { "completed" } else { "incomplete" };
        writeln!(self.out, "Task {id} marked as {state}.")?;
        self.report_successor(before)
    }

    /// Announce the recurrence successor if the store grew past `before`.
    fn report_successor(&mut self, before: usize) -> Result<(), InputError> {
        if self.store.len() > before {
            let next = self.store.next_id();
            writeln!(self.out, "Next occurrence scheduled as task {}.", next.get() - 1)?;
        }
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<(), InputError> {
        if query.is_empty() {
            return Err(InputError::Usage("search <query>"));
        }
        let tasks = self.store.search_tasks(query);
        if tasks.is_empty() {
            writeln!(self.out, "No tasks found matching '{query}'.")?;
            return Ok(());
        }
        writeln!(self.out, "Found {} task(s) matching '{query}':", tasks.len())?;
        for task in tasks {
            writeln!(self.out, "{}", format_task(task))?;
        }
        Ok(())
    }

    fn overdue(&mut self) -> Result<(), InputError> {
        let tasks = self.store.overdue_tasks();
        if tasks.is_empty() {
            writeln!(self.out, "No overdue tasks.")?;
            return Ok(());
        }
        writeln!(self.out, "Overdue ({}):", tasks.len())?;
        for task in tasks {
            writeln!(self.out, "{}", format_task(task))?;
        }
        Ok(())
    }

    fn upcoming(&mut self, args: &str) -> Result<(), InputError> {
        let days = match args.trim() {
            "" => self.store.config().upcoming_horizon_days,
            n => n
                .parse()
                .map_err(|_| InputError::Usage("upcoming [days]"))?,
        };
        let tasks = self.store.upcoming_tasks(days);
        if tasks.is_empty() {
            writeln!(self.out, "Nothing due in the next {days} day(s).")?;
            return Ok(());
        }
        writeln!(self.out, "Due in the next {days} day(s) ({}):", tasks.len())?;
        for task in tasks {
            writeln!(self.out, "{}", format_task(task))?;
        }
        Ok(())
    }
}

fn parse_id(raw: &str, usage: &'static str) -> Result<TaskId, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InputError::Usage(usage));
    }
    raw.parse()
        .map_err(|_| InputError::InvalidId(raw.to_string()))
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn append_word(value: &mut String, word: &str) {
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(word);
}

fn sort_key(name: &str) -> SortKey {
    match name {
        "due" => SortKey::DueDateAsc,
        "due-desc" => SortKey::DueDateDesc,
        other => SortKey::from_name(other),
    }
}

const UPDATE_FIELDS: &[&str] = &[
    "title",
    "description",
    "desc",
    "priority",
    "tags",
    "due",
    "due_date",
    "completed",
    "recurrence",
    "repeat",
];

/// Parse `field=value` pairs. Words without `=` continue the previous value,
/// so `title=Buy oat milk` sets a three-word title. Unknown fields (and any
/// words that follow them) are skipped.
fn parse_assignments(raw: &str) -> Result<TaskUpdate, InputError> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    let mut continuing = false;
    for token in raw.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if UPDATE_FIELDS.contains(&key) => {
                pairs.push((key, value.to_string()));
                continuing = true;
            }
            Some((key, _)) => {
                debug!(field = key, "ignoring unknown update field");
                continuing = false;
            }
            None if continuing => {
                if let Some((_, value)) = pairs.last_mut() {
                    append_word(value, token);
                }
            }
            None => debug!(token, "ignoring stray word"),
        }
    }

    let mut update = TaskUpdate::new();
    for (key, value) in pairs {
        update = match key {
            "title" => update.with_title(value),
            "description" | "desc" if value.is_empty() => update.clear_description(),
            "description" | "desc" => update.with_description(value),
            "priority" => update.with_priority(value),
            "tags" => update.with_tags(split_tags(&value)),
            "due" | "due_date" if value.is_empty() || value == "none" => update.clear_due_date(),
            "due" | "due_date" => update.with_due_date(parse_due_date(&value)?),
            "completed" => update.with_completed(parse_flag_value(&value)?),
            "recurrence" | "repeat" => update.with_recurrence(value),
            _ => update,
        };
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn console() -> Console<FixedClock, Vec<u8>> {
        Console::new(TaskStore::with_clock(FixedClock::new(now())), Vec::new())
    }

    fn run(console: &mut Console<FixedClock, Vec<u8>>, lines: &[&str]) -> String {
        for line in lines {
            assert_eq!(console.execute(line).unwrap(), Flow::Continue);
        }
        let out = std::mem::take(&mut console.out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_with_flags_then_view() {
        let mut c = console();
        let out = run(
            &mut c,
            &[
                "add  Pay   rent --priority=high --tags=home,bills --due=2024-05-01 --repeat=monthly",
                "view 1",
            ],
        );
        assert_eq!(
            out,
            "Task added with ID: 1\n\
             [ ] [1] Pay rent (Priority: High, Tags: home, bills, Due: 2024-05-01 00:00, Repeats: monthly)\n"
        );
    }

    #[test]
    fn completing_a_recurring_task_reports_the_successor() {
        let mut c = console();
        let out = run(&mut c, &["add Standup --due=2024-04-16 --repeat=daily", "done 1"]);
        assert!(out.contains("Task 1 marked as completed."));
        assert!(out.contains("Next occurrence scheduled as task 2."));

        let next = c.store().get_task(TaskId::new(2)).unwrap();
        assert_eq!(
            next.due_date(),
            Some(NaiveDate::from_ymd_opt(2024, 4, 17).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn add_flag_values_may_span_several_words() {
        let mut c = console();
        run(
            &mut c,
            &["add Team meeting --due=2024-05-01 14:30 --desc=bring the slides --priority=high"],
        );
        let task = c.store().get_task(TaskId::new(1)).unwrap();
        assert_eq!(task.title(), "Team meeting");
        assert_eq!(task.description(), Some("bring the slides"));
        assert_eq!(
            task.due_date(),
            Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(14, 30, 0).unwrap())
        );
        assert_eq!(task.priority(), Priority::High);
    }

    #[test]
    fn unknown_add_flag_is_rejected() {
        let mut c = console();
        let out = run(&mut c, &["add Thing --colour=blue"]);
        assert_eq!(out, "Error: unknown option \"--colour\"\n");
        assert!(c.store().is_empty());
    }

    #[test]
    fn completing_through_update_reports_the_successor() {
        let mut c = console();
        let out = run(&mut c, &["add Water plants --due=2024-04-16 --repeat=weekly", "update 1 completed=yes"]);
        assert_eq!(
            out,
            "Task added with ID: 1\nTask 1 updated.\nNext occurrence scheduled as task 2.\n"
        );
        assert_eq!(c.store().len(), 2);
    }

    #[test]
    fn misspelled_completion_flag_is_an_error() {
        let mut c = console();
        run(&mut c, &["add Draft", "done 1"]);
        let out = run(&mut c, &["update 1 completed=ture"]);
        assert_eq!(out, "Error: \"ture\" is not a yes/no value\n");
        assert!(c.store().get_task(TaskId::new(1)).unwrap().is_completed());
    }

    #[test]
    fn update_supports_multi_word_values_and_ignores_unknown_fields() {
        let mut c = console();
        run(&mut c, &["add Draft", "update 1 title=Buy oat milk colour=blue priority=LOW"]);
        let task = c.store().get_task(TaskId::new(1)).unwrap();
        assert_eq!(task.title(), "Buy oat milk");
        assert_eq!(task.priority(), Priority::Low);

        run(&mut c, &["update 1 tags=a,b due=2024-04-20 14:00 completed=yes"]);
        let task = c.store().get_task(TaskId::new(1)).unwrap();
        assert_eq!(task.tags(), ["a".to_string(), "b".to_string()]);
        assert_eq!(task.due_date(), Some(now() + Duration::days(5) + Duration::hours(5)));
        assert!(task.is_completed());
    }

    #[test]
    fn errors_are_reported_and_the_console_continues() {
        let mut c = console();
        let out = run(
            &mut c,
            &[
                "view 7",
                "view seven",
                "add --priority=high",
                "add Thing --priority=urgent",
                "update 1",
                "frobnicate",
                "add Real task",
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Error: task with id 7 does not exist");
        assert_eq!(lines[1], "Error: \"seven\" is not a valid task id");
        assert!(lines[2].starts_with("Error: usage: add <title>"));
        assert!(lines[3].starts_with("Error: unknown priority \"urgent\""));
        assert!(lines[4].starts_with("Error: usage: update <id>"));
        assert!(lines[5].starts_with("Error: unknown command \"frobnicate\""));
        assert_eq!(lines[6], "Task added with ID: 1");
    }

    #[test]
    fn list_filters_and_sorts() {
        let mut c = console();
        let out = run(
            &mut c,
            &[
                "add zeta --priority=high",
                "add alpha --priority=high",
                "add beta --priority=low",
                "done 1",
            ],
        );
        assert!(out.contains("Task 1 marked as completed."));

        let out = run(&mut c, &["list --incomplete --priority=high --sort=title"]);
        assert_eq!(
            out,
            "Found 1 task(s):\n[ ] [2] alpha (Priority: High)\n"
        );
        let out = run(&mut c, &["list --tag=nothing"]);
        assert_eq!(out, "No tasks found.\n");
    }

    #[test]
    fn list_as_json() {
        let mut c = console().with_json(true);
        run(&mut c, &["add Export me --tags=x"]);
        let out = run(&mut c, &["list"]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["title"], "Export me");
        assert_eq!(value[0]["priority"], "Medium");
        assert_eq!(value[0]["tags"][0], "x");
    }

    #[test]
    fn search_overdue_and_upcoming() {
        let mut c = console();
        run(
            &mut c,
            &[
                "add Buy groceries --due=2024-04-14",
                "add Dentist --due=2024-04-17",
                "add Taxes --due=2024-06-01",
            ],
        );
        let out = run(&mut c, &["search GROCERIES"]);
        assert!(out.starts_with("Found 1 task(s) matching 'GROCERIES':"));

        let out = run(&mut c, &["overdue"]);
        assert!(out.contains("[1] Buy groceries"));
        assert!(!out.contains("Dentist"));

        let out = run(&mut c, &["upcoming"]);
        assert!(out.starts_with("Due in the next 7 day(s) (1):"));
        assert!(out.contains("[2] Dentist"));

        let out = run(&mut c, &["upcoming 60"]);
        assert!(out.contains("[3] Taxes"));
    }

    #[test]
    fn delete_then_view_fails() {
        let mut c = console();
        let out = run(&mut c, &["add Temp", "delete 1", "view 1"]);
        assert!(out.contains("Task 1 (Temp) deleted."));
        assert!(out.ends_with("Error: task with id 1 does not exist\n"));
    }

    #[test]
    fn quit_and_blank_lines() {
        let mut c = console();
        assert_eq!(c.execute("   ").unwrap(), Flow::Continue);
        assert_eq!(c.execute("QUIT").unwrap(), Flow::Quit);
        assert_eq!(c.execute("q").unwrap(), Flow::Quit);
        assert!(c.out.is_empty());
    }
}
