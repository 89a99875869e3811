use std::path::PathBuf;

use chrono::Utc;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::store::{KeyValueStore, StorageError};
use crate::model::task::Task;

/// Key the task list is stored under unless configured otherwise
pub const TASKS_KEY: &str = "todos";

/// Persistence adapter: the whole task list as one JSON array under one key
pub struct TaskStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    recovery_dir: Option<PathBuf>,
}

impl TaskStore {
    /// Wrap a backend. On-disk backends also get a recovery log next to
    /// their data.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let recovery_dir = backend.location().map(|p| p.to_path_buf());
        TaskStore {
            backend,
            key: TASKS_KEY.to_string(),
            recovery_dir,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored list. Never fails: a missing, unreadable or malformed
    /// value yields an empty list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("no stored tasks under key={}", self.key);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("could not read tasks (key={}): {}", self.key, e);
                return Vec::new();
            }
        };

        // A stored `null` is treated like a missing value
        match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
            Ok(tasks) => {
                let tasks = tasks.unwrap_or_default();
                log::debug!("loaded {} tasks (key={})", tasks.len(), self.key);
                tasks
            }
            Err(e) => {
                log::warn!(
                    "stored tasks are malformed, starting empty (key={}): {}",
                    self.key,
                    e
                );
                if self.already_preserved(&raw) {
                    log::debug!("malformed value already in recovery log (key={})", self.key);
                } else {
                    self.preserve(RecoveryCategory::Parser, "unreadable task list", &raw, &e.to_string());
                }
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list with a full snapshot of `tasks`.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;
        if let Err(e) = self.backend.set(&self.key, &json) {
            log::error!("could not save {} tasks (key={}): {}", tasks.len(), self.key, e);
            self.preserve(RecoveryCategory::Write, "task list not saved", &json, &e.to_string());
            return Err(e);
        }
        log::debug!("saved {} tasks (key={})", tasks.len(), self.key);
        Ok(())
    }

    /// Whether the newest unreadable-data entry for this key holds `raw`.
    /// Every CLI run loads the list, so the same bad value is logged once.
    fn already_preserved(&self, raw: &str) -> bool {
        let Some(dir) = &self.recovery_dir else {
            return false;
        };
        recovery::read_recovery_entries(dir, None)
            .into_iter()
            .find(|entry| {
                entry.category == RecoveryCategory::Parser
                    && entry
                        .fields
                        .iter()
                        .any(|(name, value)| name == "Key" && *value == self.key)
            })
            .is_some_and(|entry| entry.body.trim() == raw.lines().collect::<Vec<_>>().join("\n").trim())
    }

    fn preserve(&self, category: RecoveryCategory, description: &str, body: &str, error: &str) {
        if let Some(dir) = &self.recovery_dir {
            recovery::log_recovery(
                dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category,
                    description: description.to_string(),
                    fields: vec![
                        ("Key".to_string(), self.key.clone()),
                        ("Error".to_string(), error.to_string()),
                    ],
                    body: body.to_string(),
                },
            );
        }
    }
}
