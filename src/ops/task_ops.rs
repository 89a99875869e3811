use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::model::task::{Filter, Task, TaskId};

/// Why a new task was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("a due date is required")]
    MissingDate,
    #[error("due date {0} is in the past; pick today or a later date")]
    PastDate(NaiveDate),
    #[error("invalid date '{0}' (expected YYYY-MM-DD, today or tomorrow)")]
    InvalidDate(String),
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Check add-task input. Returns the trimmed text and the due date.
///
/// Checks run in order (text, then presence of a date, then the date itself)
/// so exactly one error is reported per rejected attempt.
pub fn validate_new_task(
    text: &str,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(String, NaiveDate), ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let date = date.ok_or(ValidationError::MissingDate)?;
    if date < today {
        return Err(ValidationError::PastDate(date));
    }
    Ok((text.to_string(), date))
}

/// Allocate an id from the creation time in milliseconds.
///
/// Bumped past the largest existing id so two tasks created within the same
/// millisecond never share an id. When the largest id is already `i64::MAX`
/// the first free id counting down from the stamp is used instead.
pub fn next_id(tasks: &[Task], now: DateTime<Utc>) -> TaskId {
    let stamp = now.timestamp_millis();
    match tasks.iter().map(|t| t.id).max() {
        Some(max) if max >= stamp => match max.checked_add(1) {
            Some(id) => id,
            None => {
                let taken: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
                // at most tasks.len() + 1 candidates before a free one
                (i64::MIN..=stamp)
                    .rev()
                    .find(|id| !taken.contains(id))
                    .unwrap_or(i64::MIN)
            }
        },
        _ => stamp,
    }
}

/// Parse a due date typed by the user.
///
/// Accepts `YYYY-MM-DD`, `today` and `tomorrow`. Blank input means no date was
/// given (`Ok(None)`), which `validate_new_task` reports as `MissingDate`.
pub fn parse_due_date(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.to_ascii_lowercase().as_str() {
        "today" => return Ok(Some(today)),
        "tomorrow" => {
            return today
                .checked_add_days(Days::new(1))
                .map(Some)
                .ok_or_else(|| ValidationError::InvalidDate(input.to_string()));
        }
        _ => {}
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

pub fn find_task(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|t| t.id == id)
}

pub fn find_task_mut(tasks: &mut [Task], id: TaskId) -> Option<&mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Flip completion. Returns false if no task has that id.
pub fn toggle_complete(tasks: &mut [Task], id: TaskId) -> bool {
    match find_task_mut(tasks, id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

/// Replace a task's text. Blank replacement text leaves the task untouched.
pub fn edit_text(tasks: &mut [Task], id: TaskId, new_text: &str) -> bool {
    let new_text = new_text.trim();
    if new_text.is_empty() {
        return false;
    }
    match find_task_mut(tasks, id) {
        Some(task) => {
            task.text = new_text.to_string();
            true
        }
        None => false,
    }
}

/// Remove the task with this id. Returns false if absent.
pub fn remove_task(tasks: &mut Vec<Task>, id: TaskId) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

// ---------------------------------------------------------------------------
// Display order
// ---------------------------------------------------------------------------

/// Tasks passing `filter`, sorted by due date ascending.
///
/// Only the date is compared; tasks due the same day keep list order because
/// the sort is stable, but callers must not rely on that.
pub fn visible_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    let mut view: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    view.sort_by_key(|t| t.date);
    view
}
