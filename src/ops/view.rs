//! The render step: a pure function from (tasks, filter) to a display
//! description shared by the terminal UI and the CLI.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Filter, Task, TaskId};
use crate::ops::task_ops::visible_tasks;

/// Everything a presentation layer needs to draw the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListView {
    pub filter: Filter,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ViewBody {
    /// Shown instead of rows when the filtered list is empty
    Placeholder(String),
    Rows(Vec<TaskRow>),
}

/// One displayed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    /// Formatted due date, e.g. "Jan 5, 2025"
    pub due_label: String,
    pub status: StatusBadge,
    pub actions: [TaskAction; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Pending,
    Completed,
}

impl StatusBadge {
    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::Pending => "Pending",
            StatusBadge::Completed => "Completed",
        }
    }
}

/// Per-row affordance, bound to the row's task id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum TaskAction {
    Toggle(TaskId),
    Edit(TaskId),
    Delete(TaskId),
}

impl TaskAction {
    pub fn task_id(self) -> TaskId {
        match self {
            TaskAction::Toggle(id) | TaskAction::Edit(id) | TaskAction::Delete(id) => id,
        }
    }

    /// Button glyph. The toggle glyph depends on the current status.
    pub fn glyph(self, status: StatusBadge) -> &'static str {
        match (self, status) {
            (TaskAction::Toggle(_), StatusBadge::Pending) => "\u{2713}",
            (TaskAction::Toggle(_), StatusBadge::Completed) => "\u{21BA}",
            (TaskAction::Edit(_), _) => "\u{270E}",
            (TaskAction::Delete(_), _) => "\u{2715}",
        }
    }

    pub fn hint(self, status: StatusBadge) -> &'static str {
        match (self, status) {
            (TaskAction::Toggle(_), StatusBadge::Pending) => "Mark as completed",
            (TaskAction::Toggle(_), StatusBadge::Completed) => "Mark as pending",
            (TaskAction::Edit(_), _) => "Edit task",
            (TaskAction::Delete(_), _) => "Delete task",
        }
    }
}

impl TaskListView {
    pub fn rows(&self) -> &[TaskRow] {
        match &self.body {
            ViewBody::Rows(rows) => rows,
            ViewBody::Placeholder(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, ViewBody::Placeholder(_))
    }
}

/// Build the display description for `tasks` under `filter`
pub fn render(tasks: &[Task], filter: Filter) -> TaskListView {
    let visible = visible_tasks(tasks, filter);
    let body = if visible.is_empty() {
        ViewBody::Placeholder(placeholder_text(filter).to_string())
    } else {
        ViewBody::Rows(visible.into_iter().map(task_row).collect())
    };
    TaskListView { filter, body }
}

fn task_row(task: &Task) -> TaskRow {
    let status = if task.completed {
        StatusBadge::Completed
    } else {
        StatusBadge::Pending
    };
    TaskRow {
        id: task.id,
        text: task.text.clone(),
        due_label: format_date(task.date),
        status,
        actions: [
            TaskAction::Toggle(task.id),
            TaskAction::Edit(task.id),
            TaskAction::Delete(task.id),
        ],
    }
}

pub fn placeholder_text(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet",
        Filter::Pending => "No pending tasks",
        Filter::Completed => "No completed tasks",
    }
}

/// Date-only label: "Jan 5, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
