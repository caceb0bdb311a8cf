//! Operator-facing status lines on stderr.

use std::fmt::Display;

use console::{Term, style};

/// Status writer. Command results go to stdout; this is everything else.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn info(&self, msg: impl Display) {
        self.line(msg);
    }

    /// Yellow.
    pub(crate) fn warning(&self, msg: impl Display) {
        self.line(style(msg).yellow());
    }

    /// Red, prefixed with `Error:`.
    pub(crate) fn error(&self, msg: impl Display) {
        self.line(style(format!("Error: {msg}")).red());
    }

    fn line(&self, msg: impl Display) {
        // A closed stderr leaves nowhere to report to.
        let _ = self.term.write_line(&msg.to_string());
    }
}
