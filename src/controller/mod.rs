//! The task list controller: owns the list, the filter and the transient
//! notice, persists after every mutation and tells subscribers to redraw.

pub mod clock;
pub mod interaction;
pub mod notice;

pub use clock::{Clock, ManualClock, SystemClock};
pub use interaction::{Answer, Interaction, ScriptedInteraction};
pub use notice::Notice;

use std::path::Path;

use chrono::{NaiveDate, TimeDelta};

use crate::io::store::{FileStore, StorageError};
use crate::io::task_store::TaskStore;
use crate::model::config::Config;
use crate::model::task::{Filter, Task, TaskId};
use crate::ops::task_ops::{self, ValidationError};
use crate::ops::view::{self, TaskListView};

/// Seconds a notice stays up unless configured otherwise
pub const DEFAULT_NOTICE_SECS: i64 = 3;

type Listener = Box<dyn FnMut(&TaskListView)>;

pub struct TaskListController {
    tasks: Vec<Task>,
    filter: Filter,
    store: TaskStore,
    interaction: Box<dyn Interaction>,
    clock: Box<dyn Clock>,
    notice: Option<Notice>,
    notice_ttl: TimeDelta,
    storage_error: Option<StorageError>,
    listeners: Vec<Listener>,
}

impl TaskListController {
    /// Build a controller over `store`, loading whatever it holds.
    pub fn new(store: TaskStore, interaction: Box<dyn Interaction>, clock: Box<dyn Clock>) -> Self {
        let tasks = store.load();
        log::info!("controller started with {} tasks", tasks.len());
        TaskListController {
            tasks,
            filter: Filter::default(),
            store,
            interaction,
            clock,
            notice: None,
            notice_ttl: TimeDelta::seconds(DEFAULT_NOTICE_SECS),
            storage_error: None,
            listeners: Vec::new(),
        }
    }

    /// Controller over the file store in `data_dir`, using the wall clock.
    pub fn open(data_dir: &Path, config: &Config, interaction: Box<dyn Interaction>) -> Self {
        let store = TaskStore::new(Box::new(FileStore::new(data_dir)))
            .with_key(config.storage.key.clone());
        let secs = i64::try_from(config.ui.notice_secs)
            .unwrap_or(DEFAULT_NOTICE_SECS)
            .min(86_400);
        TaskListController::new(store, interaction, Box::new(SystemClock))
            .with_notice_ttl(TimeDelta::seconds(secs))
    }

    pub fn with_notice_ttl(mut self, ttl: TimeDelta) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Call `listener` with the fresh view after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&TaskListView) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Filtered, date-sorted tasks
    pub fn compute_view(&self) -> Vec<&Task> {
        task_ops::visible_tasks(&self.tasks, self.filter)
    }

    pub fn view(&self) -> TaskListView {
        view::render(&self.tasks, self.filter)
    }

    /// The current notice, if it has not expired yet
    pub fn notice(&self) -> Option<&str> {
        let now = self.clock.now();
        self.notice
            .as_ref()
            .filter(|n| n.is_live(now))
            .map(|n| n.message.as_str())
    }

    /// The last save failure, cleared by the next successful save
    pub fn storage_error(&self) -> Option<&StorageError> {
        self.storage_error.as_ref()
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Add a task due on `date`.
    ///
    /// On `Ok` the caller should clear its input fields. On `Err` nothing
    /// changed and the error is also shown as a notice.
    pub fn add(&mut self, text: &str, date: Option<NaiveDate>) -> Result<Task, ValidationError> {
        self.notice = None;
        let (text, date) = match task_ops::validate_new_task(text, date, self.clock.today()) {
            Ok(valid) => valid,
            Err(e) => {
                log::debug!("add rejected: {}", e);
                self.show_notice(e.to_string());
                return Err(e);
            }
        };

        let now = self.clock.now();
        let task = Task::new(task_ops::next_id(&self.tasks, now), text, date, now);
        log::debug!("add id={} date={}", task.id, task.date);
        self.tasks.push(task.clone());
        self.commit();
        Ok(task)
    }

    /// Flip a task's completion. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        if !task_ops::toggle_complete(&mut self.tasks, id) {
            return false;
        }
        log::debug!("toggle id={}", id);
        self.commit();
        true
    }

    /// Ask the user for new text, then apply it. A cancelled or blank answer
    /// changes nothing.
    pub fn edit(&mut self, id: TaskId) -> bool {
        let current = match task_ops::find_task(&self.tasks, id) {
            Some(task) => task.text.clone(),
            None => return false,
        };
        match self.interaction.prompt_text("Edit task:", &current) {
            Some(new_text) => self.edit_text(id, &new_text),
            None => false,
        }
    }

    /// Replace a task's text. Blank text and unknown ids are ignored.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> bool {
        if !task_ops::edit_text(&mut self.tasks, id, new_text) {
            return false;
        }
        log::debug!("edit id={}", id);
        self.commit();
        true
    }

    /// Remove one task. Unknown ids are ignored.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if !task_ops::remove_task(&mut self.tasks, id) {
            return false;
        }
        log::debug!("delete id={}", id);
        self.commit();
        true
    }

    /// Clear the list after the user confirms. Does nothing on an empty list.
    pub fn delete_all(&mut self) -> bool {
        if self.tasks.is_empty() {
            return false;
        }
        let message = match self.tasks.len() {
            1 => "Delete the only task?".to_string(),
            n => format!("Delete all {} tasks?", n),
        };
        if !self.interaction.confirm(&message) {
            return false;
        }
        log::info!("delete all ({} tasks)", self.tasks.len());
        self.tasks.clear();
        self.commit();
        true
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.notify();
    }

    /// Show a transient message, replacing any current one and its deadline
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(message, self.clock.now(), self.notice_ttl));
        self.notify();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Persist the full list, then redraw. A failed save keeps the in-memory
    /// list as is.
    fn commit(&mut self) {
        match self.store.save(&self.tasks) {
            Ok(()) => {
                self.storage_error = None;
                self.notify();
            }
            Err(e) => {
                let message = format!("Could not save tasks: {}", e);
                self.storage_error = Some(e);
                self.show_notice(message);
            }
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let view = self.view();
        for listener in &mut self.listeners {
            listener(&view);
        }
    }
}
