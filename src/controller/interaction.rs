use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Blocking questions the controller asks the user.
///
/// The terminal UI answers with a modal popup, the CLI with stdin.
pub trait Interaction {
    /// Yes/no question. `false` means the action is abandoned.
    fn confirm(&mut self, message: &str) -> bool;

    /// Single-line text prompt pre-filled with `default`.
    /// `None` means cancelled, which is distinct from an empty answer.
    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String>;
}

/// One canned answer for `ScriptedInteraction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Text(Option<String>),
}

/// Replays canned answers in order and records every question asked.
///
/// Clones share the same script and transcript. Once the script runs out,
/// confirmations are declined and prompts are cancelled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    answers: Rc<RefCell<VecDeque<Answer>>>,
    asked: Rc<RefCell<Vec<String>>>,
}

impl ScriptedInteraction {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedInteraction {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            asked: Rc::default(),
        }
    }

    pub fn push(&self, answer: Answer) {
        self.answers.borrow_mut().push_back(answer);
    }

    /// Messages asked so far, oldest first
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        matches!(
            self.answers.borrow_mut().pop_front(),
            Some(Answer::Confirm(true))
        )
    }

    fn prompt_text(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.borrow_mut().push(message.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Text(text)) => text,
            _ => None,
        }
    }
}
