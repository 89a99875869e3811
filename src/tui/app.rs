use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::controller::TaskListController;
use crate::model::config::Config;
use crate::model::task::TaskId;
use crate::ops::view::TaskListView;

use super::input;
use super::prompt::TerminalInteraction;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the add form
    Add,
}

/// Which add-form field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Text,
    Date,
}

/// The add-task input fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub text: String,
    pub date: String,
    pub field: AddField,
}

impl AddForm {
    pub fn clear(&mut self) {
        *self = AddForm::default();
    }

    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            AddField::Text => &mut self.text,
            AddField::Date => &mut self.date,
        }
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            AddField::Text => AddField::Date,
            AddField::Date => AddField::Text,
        };
    }
}

/// Main application state
pub struct App {
    pub controller: TaskListController,
    pub mode: Mode,
    pub form: AddForm,
    /// Index into the rows of the current view
    pub cursor: usize,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(controller: TaskListController, config: &Config) -> Self {
        App {
            controller,
            mode: Mode::Navigate,
            form: AddForm::default(),
            cursor: 0,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
        }
    }

    /// Id of the task under the cursor
    pub fn selected_id(&self) -> Option<TaskId> {
        self.controller.compute_view().get(self.cursor).map(|t| t.id)
    }

    pub fn visible_count(&self) -> usize {
        self.controller.compute_view().len()
    }

    /// Keep the cursor on a row after the view shrinks
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        self.cursor = if count == 0 { 0 } else { self.cursor.min(count - 1) };
    }

    /// Move the cursor onto the task with this id, if it is visible
    pub fn select_task(&mut self, id: TaskId) {
        if let Some(pos) = self.controller.compute_view().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }
}

/// Run the TUI over the tasks stored in `data_dir`
pub fn run(data_dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Rc::new(RefCell::new(Terminal::new(backend)?));
    terminal.borrow_mut().clear()?;

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Modal prompts redraw the list behind them from the last notified view
    let backdrop: Rc<RefCell<TaskListView>> = Rc::new(RefCell::new(TaskListView {
        filter: Default::default(),
        body: crate::ops::view::ViewBody::Rows(Vec::new()),
    }));
    let theme = Theme::from_config(&config.ui);
    let interaction = TerminalInteraction::new(terminal.clone(), backdrop.clone(), theme);

    let mut controller = TaskListController::open(data_dir, config, Box::new(interaction));
    *backdrop.borrow_mut() = controller.view();
    let sink = backdrop.clone();
    controller.subscribe(move |view| *sink.borrow_mut() = view.clone());

    let mut app = App::new(controller, config);
    let result = run_event_loop(&terminal, &mut app);

    disable_raw_mode()?;
    let mut terminal = terminal.borrow_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &Rc<RefCell<Terminal<CrosstermBackend<io::Stdout>>>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // The borrow must end before input handling: modal prompts draw too
        terminal.borrow_mut().draw(|frame| render::render(frame, app))?;

        // Poll keeps redrawing so expired notices disappear on their own
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
