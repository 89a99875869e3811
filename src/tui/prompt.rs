//! Modal confirm and text prompts drawn over the task list.
//!
//! The controller asks its questions synchronously, so the prompt runs a
//! small event loop of its own until the user answers.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::controller::Interaction;
use crate::ops::view::TaskListView;
use crate::util::unicode::pop_grapheme;

use super::render;
use super::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Confirm,
    Text,
}

/// What the user is being asked and what they have typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub message: String,
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Confirmed(bool),
    Submitted(String),
    Cancelled,
}

impl PromptState {
    pub fn confirm(message: &str) -> Self {
        PromptState {
            message: message.to_string(),
            kind: PromptKind::Confirm,
            input: String::new(),
        }
    }

    /// Text prompt pre-filled with `default`
    pub fn text(message: &str, default: &str) -> Self {
        PromptState {
            message: message.to_string(),
            kind: PromptKind::Text,
            input: default.to_string(),
        }
    }

    /// Feed one key. Returns the outcome once the prompt is answered.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match self.kind {
            PromptKind::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') if !ctrl => {
                    Some(PromptOutcome::Confirmed(true))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(PromptOutcome::Confirmed(false))
                }
                KeyCode::Char('c') if ctrl => Some(PromptOutcome::Confirmed(false)),
                _ => None,
            },
            PromptKind::Text => match key.code {
                KeyCode::Esc => Some(PromptOutcome::Cancelled),
                KeyCode::Char('c') if ctrl => Some(PromptOutcome::Cancelled),
                KeyCode::Char('u') if ctrl => {
                    self.input.clear();
                    None
                }
                KeyCode::Enter => Some(PromptOutcome::Submitted(self.input.clone())),
                KeyCode::Backspace => {
                    pop_grapheme(&mut self.input);
                    None
                }
                KeyCode::Char(c) if !ctrl => {
                    self.input.push(c);
                    None
                }
                _ => None,
            },
        }
    }
}

/// `Interaction` backed by the terminal the TUI is drawing on
pub struct TerminalInteraction<B: Backend> {
    terminal: Rc<RefCell<Terminal<B>>>,
    /// Latest list view, redrawn behind the prompt
    backdrop: Rc<RefCell<TaskListView>>,
    theme: Theme,
}

impl<B: Backend> TerminalInteraction<B> {
    pub fn new(
        terminal: Rc<RefCell<Terminal<B>>>,
        backdrop: Rc<RefCell<TaskListView>>,
        theme: Theme,
    ) -> Self {
        TerminalInteraction {
            terminal,
            backdrop,
            theme,
        }
    }

    /// Redraw the backdrop with `state` on top
    fn draw_prompt(&self, state: &PromptState) -> std::io::Result<()> {
        let backdrop = self.backdrop.borrow();
        let mut terminal = self.terminal.borrow_mut();
        terminal
            .draw(|frame| {
                render::render_backdrop(frame, &backdrop, &self.theme);
                render::prompt_popup::render_prompt(frame, state, &self.theme);
            })
            .map(|_| ())
    }

    /// Draw and read keys until the prompt is answered. Terminal errors
    /// count as a cancel.
    fn ask(&mut self, mut state: PromptState) -> PromptOutcome {
        loop {
            if let Err(e) = self.draw_prompt(&state) {
                log::warn!("prompt draw failed: {}", e);
                return PromptOutcome::Cancelled;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(outcome) = state.handle_key(key) {
                        return outcome;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("prompt input failed: {}", e);
                    return PromptOutcome::Cancelled;
                }
            }
        }
    }
}

impl<B: Backend> Interaction for TerminalInteraction<B> {
    fn confirm(&mut self, message: &str) -> bool {
        matches!(
            self.ask(PromptState::confirm(message)),
            PromptOutcome::Confirmed(true)
        )
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        match self.ask(PromptState::text(message, default)) {
            PromptOutcome::Submitted(text) => Some(text),
            _ => None,
        }
    }
}
