use std::process::Command;

use tracing::debug;

use crate::yinbao::tools::error::{Result, ToolError};
use crate::yinbao::tools::model::{Invocation, StepOutcome};

/// Executes one invocation to completion.
///
/// A non-zero exit is a normal [`StepOutcome`], not an error. `Err` is
/// reserved for programs that could not be started.
pub trait Runner {
    fn invoke(&mut self, invocation: &Invocation) -> Result<StepOutcome>;
}

/// Runner that spawns real child processes with inherited stdio and waits
/// for each one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn invoke(&mut self, invocation: &Invocation) -> Result<StepOutcome> {
        debug!(command = %invocation.display(), "spawning");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| ToolError::Launch {
                program: invocation.program.display().to_string(),
                source,
            })?;

        Ok(match status.code() {
            Some(0) => StepOutcome::Succeeded,
            Some(code) => StepOutcome::Failed(code),
            None => StepOutcome::Terminated,
        })
    }
}
