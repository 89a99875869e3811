use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::controller::{ManualClock, ScriptedInteraction, TaskListController};
use crate::io::store::MemoryStore;
use crate::io::task_store::TaskStore;
use crate::model::config::Config;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An app over an in-memory store, with today fixed at 2025-01-05
pub struct Harness {
    pub app: App,
    pub store: MemoryStore,
    pub clock: ManualClock,
    pub script: ScriptedInteraction,
}

pub fn harness() -> Harness {
    let store = MemoryStore::new();
    let clock = ManualClock::new("2025-01-05T10:00:00Z".parse().unwrap())
        .with_today(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    let script = ScriptedInteraction::default();
    let controller = TaskListController::new(
        TaskStore::new(Box::new(store.clone())),
        Box::new(script.clone()),
        Box::new(clock.clone()),
    );
    Harness {
        app: App::new(controller, &Config::default()),
        store,
        clock,
        script,
    }
}

impl Harness {
    /// Add a task due on January `day`, 2025
    pub fn seed(&mut self, text: &str, day: u32, completed: bool) {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        let task = self.app.controller.add(text, Some(date)).unwrap();
        if completed {
            self.app.controller.toggle_complete(task.id);
        }
    }
}
