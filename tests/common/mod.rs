//! Test doubles for the filesystem and process seams.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use yinbao_tools::io::probe::PathProbe;
use yinbao_tools::io::process::Runner;
use yinbao_tools::model::{Invocation, StepOutcome};
use yinbao_tools::{Result, ToolError};

/// Probe that only knows about the paths it was given.
#[derive(Debug, Default)]
pub struct KnownPaths(HashSet<PathBuf>);

#[allow(dead_code)]
impl KnownPaths {
    pub fn with(paths: &[&str]) -> Self {
        Self(paths.iter().map(PathBuf::from).collect())
    }
}

impl PathProbe for KnownPaths {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

/// How the recording runner answers for a given script.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit(i32),
    Unlaunchable,
}

/// Runner that records every invocation instead of spawning anything.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<Invocation>,
    scripted: Vec<(String, Scripted)>,
}

#[allow(dead_code)]
impl RecordingRunner {
    /// Makes invocations whose script path ends with `script` answer with `result`.
    pub fn scripted(mut self, script: &str, result: Scripted) -> Self {
        self.scripted.push((script.to_string(), result));
        self
    }

    pub fn scripts(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|call| {
                Path::new(&call.args[0])
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Runner for RecordingRunner {
    fn invoke(&mut self, invocation: &Invocation) -> Result<StepOutcome> {
        self.calls.push(invocation.clone());
        let script = invocation
            .args
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self
            .scripted
            .iter()
            .find(|(name, _)| script.ends_with(name.as_str()))
        {
            Some((_, Scripted::Exit(0))) | None => Ok(StepOutcome::Succeeded),
            Some((_, Scripted::Exit(code))) => Ok(StepOutcome::Failed(*code)),
            Some((_, Scripted::Unlaunchable)) => Err(ToolError::Launch {
                program: invocation.program.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

/// Returns the value following `flag` in the invocation, if the flag is present.
#[allow(dead_code)]
pub fn flag_value<'a>(invocation: &'a Invocation, flag: &str) -> Option<&'a OsStr> {
    invocation
        .args
        .iter()
        .position(|arg| arg == flag)
        .and_then(|idx| invocation.args.get(idx + 1))
        .map(OsString::as_os_str)
}
