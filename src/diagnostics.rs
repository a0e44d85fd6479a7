use log::debug;

use crate::error::LoxError;

/// The driver's diagnostic sink.
///
/// Owns the two sticky flags the process exit code is derived from:
/// `had_error` for lexical/syntax failures and `had_runtime_error` for
/// evaluation failures. The core never touches these; parser and evaluator
/// return `Result`s and the driver forwards each `Err` here exactly once.
#[derive(Debug, Default)]
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report one failure: write its display form to stderr and flip the
    /// matching flag.
    pub fn report(&mut self, error: &LoxError) {
        debug!("Reporting: {:?}", error);

        eprintln!("{}", error);

        match error {
            LoxError::Runtime { .. } => self.had_runtime_error = true,

            _ => self.had_error = true,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Forget reported syntax errors. The interactive prompt calls this
    /// before each new line; the runtime-error flag stays sticky for the
    /// whole session.
    pub fn reset_error(&mut self) {
        self.had_error = false;
    }
}
