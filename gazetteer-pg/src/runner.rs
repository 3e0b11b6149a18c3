//! Process runner backed by the local process table.

use std::process::Command;

use gazetteer_core::{ProcessError, ProcessRequest, ProcessRunner, ProcessStatus};

/// Runs helper binaries as child processes, inheriting stdio so their
/// progress output reaches the operator's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, request: &ProcessRequest) -> Result<ProcessStatus, ProcessError> {
        let status = Command::new(&request.program)
            .args(&request.args)
            .envs(request.env.iter().map(|(key, value)| (key, value)))
            .status()
            .map_err(|source| ProcessError::Launch {
                program: request.program.clone(),
                source,
            })?;
        Ok(status
            .code()
            .map_or_else(ProcessStatus::terminated, ProcessStatus::from_code))
    }
}
