//! Injected capability for launching external helper binaries.
//!
//! Shelling out is modelled as a trait so tests can substitute a runner that
//! returns controlled exit codes without invoking real binaries.

use std::{fmt, io};

use thiserror::Error;

/// Description of an external process invocation.
///
/// # Examples
/// ```
/// use gazetteer_core::ProcessRequest;
///
/// let request = ProcessRequest::new("createdb")
///     .env("PGDATABASE", "gazetteer");
/// assert_eq!(request.program, "createdb");
/// assert!(request.args.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Program name or path, resolved through the usual `PATH` lookup.
    pub program: String,
    /// Positional and flag arguments, in order.
    pub args: Vec<String>,
    /// Extra environment variables layered over the inherited environment.
    pub env: Vec<(String, String)>,
}

impl ProcessRequest {
    /// Start building a request for the given program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append one environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Append several environment variables.
    #[must_use]
    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }
}

/// Exit outcome of an external process.
///
/// Carries the exit code only; the helpers this pipeline launches report
/// nothing more structured than success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    code: Option<i32>,
}

impl ProcessStatus {
    /// Status for a process that exited with the given code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status for a process terminated without an exit code (by a signal).
    #[must_use]
    pub const fn terminated() -> Self {
        Self { code: None }
    }

    /// Whether the process exited successfully.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }

    /// The raw exit code, if the process exited normally.
    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Errors raised while launching an external process.
///
/// A non-zero exit is not an error at this level; callers classify it
/// themselves from the returned [`ProcessStatus`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be launched at all.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Runs external processes to completion.
pub trait ProcessRunner {
    /// Run the request to completion and report how it exited.
    fn run(&self, request: &ProcessRequest) -> Result<ProcessStatus, ProcessError>;
}
