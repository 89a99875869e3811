use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::task::Task;
use crate::ops::view::{StatusBadge, TaskListView, TaskRow, ViewBody, format_date};
use crate::util::unicode::fit_to_width;

/// Width of the due-date column ("Dec 31, 2024")
const DUE_COL: usize = 12;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub filter: &'static str,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub id: i64,
    pub changed: bool,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

pub fn recovery_entry_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry.timestamp.to_rfc3339(),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

fn status_box(status: StatusBadge) -> &'static str {
    match status {
        StatusBadge::Pending => "[ ]",
        StatusBadge::Completed => "[x]",
    }
}

/// `<id>  [ ]  Jan 5, 2025    Buy milk`
pub fn format_row(row: &TaskRow) -> String {
    format!(
        "{}  {}  {}  {}",
        row.id,
        status_box(row.status),
        fit_to_width(&row.due_label, DUE_COL),
        row.text
    )
}

/// The rendered list as plain text, one task per line
pub fn format_view(view: &TaskListView) -> String {
    match &view.body {
        ViewBody::Placeholder(message) => message.clone(),
        ViewBody::Rows(rows) => rows.iter().map(format_row).collect::<Vec<_>>().join("\n"),
    }
}

/// One-line summary of a single task
pub fn format_task(task: &Task) -> String {
    format!(
        "{}: {} (due {}{})",
        task.id,
        task.text,
        format_date(task.date),
        if task.completed { ", completed" } else { "" }
    )
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> String {
    let mut out = format!(
        "{} {}: {}\n",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    );
    for (key, value) in &entry.fields {
        out.push_str(&format!("  {}: {}\n", key, value));
    }
    for line in entry.body.lines() {
        out.push_str(&format!("  | {}\n", line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Filter;
    use crate::ops::view::render;
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn task(id: i64, text: &str, date: (i32, u32, u32), completed: bool) -> Task {
        let mut t = Task::new(
            id,
            text.into(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "2025-01-01T00:00:00Z".parse().unwrap(),
        );
        t.completed = completed;
        t
    }

    #[test]
    fn list_text_is_aligned() {
        let tasks = vec![
            task(2, "Call mom", (2025, 12, 31), true),
            task(1, "Buy milk", (2025, 1, 5), false),
        ];
        assert_snapshot!(format_view(&render(&tasks, Filter::All)), @r"
        1  [ ]  Jan 5, 2025   Buy milk
        2  [x]  Dec 31, 2025  Call mom
        ");
    }

    #[test]
    fn empty_list_prints_placeholder() {
        assert_eq!(format_view(&render(&[], Filter::Pending)), "No pending tasks");
    }

    #[test]
    fn single_task_summary() {
        assert_eq!(
            format_task(&task(7, "Buy milk", (2025, 1, 5), false)),
            "7: Buy milk (due Jan 5, 2025)"
        );
        assert_eq!(
            format_task(&task(7, "Buy milk", (2025, 1, 5), true)),
            "7: Buy milk (due Jan 5, 2025, completed)"
        );
    }

    #[test]
    fn list_json_uses_storage_field_names() {
        let tasks = vec![task(1, "Buy milk", (2025, 1, 5), false)];
        let json = serde_json::to_value(TaskListJson {
            filter: "all",
            tasks: tasks.iter().collect(),
        })
        .unwrap();
        assert_eq!(json["filter"], "all");
        assert_eq!(json["tasks"][0]["date"], "2025-01-05");
        assert!(json["tasks"][0].get("createdAt").is_some());
    }
}
