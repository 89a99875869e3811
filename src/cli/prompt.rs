use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crate::controller::Interaction;

/// Answers controller questions on the terminal: prompts go to stderr so
/// stdout stays clean for `--json`, answers come from stdin.
pub struct StdioInteraction<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl StdioInteraction<StdinLock<'static>, Stderr> {
    pub fn new(assume_yes: bool) -> Self {
        Self::with_io(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> StdioInteraction<R, W> {
    pub fn with_io(input: R, output: W, assume_yes: bool) -> Self {
        StdioInteraction {
            input,
            output,
            assume_yes,
        }
    }

    /// One line from input without its line ending; `None` on EOF or error.
    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Interaction for StdioInteraction<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let _ = write!(self.output, "{} [y/N] ", message);
        let _ = self.output.flush();
        matches!(
            self.read_answer().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    /// `default` is only shown, not pre-filled: an empty line comes back
    /// empty and the caller leaves the text alone. EOF cancels.
    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        let _ = write!(self.output, "{} [{}] ", message, default);
        let _ = self.output.flush();
        self.read_answer()
    }
}
