use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::yinbao::tools::error::ToolError;

/// Named tasks the orchestrator knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Clean the product export into import-ready spreadsheets.
    Clean,
    /// Download product images.
    Images,
    /// Convert and validate the package relation table.
    Package,
    /// Repair relation barcodes by matching product names.
    FixNames,
    /// Repair, clean, download and convert in one pass.
    All,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::Clean,
        Task::Images,
        Task::Package,
        Task::FixNames,
        Task::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Clean => "clean",
            Task::Images => "images",
            Task::Package => "package",
            Task::FixNames => "fixnames",
            Task::All => "all",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == value)
            .ok_or_else(|| ToolError::UnknownTask(value.to_string()))
    }
}

/// The external tool a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    RepairNames,
    Clean,
    DownloadImages,
    ConvertRelation,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::RepairNames => "repair_names",
            StepKind::Clean => "clean",
            StepKind::DownloadImages => "download_images",
            StepKind::ConvertRelation => "convert_relation",
        };
        f.write_str(label)
    }
}

/// A single external program invocation: executable plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends `flag value`.
    pub fn flag(self, flag: &str, value: impl AsRef<OsStr>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Human readable command line used in diagnostics.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// One scheduled step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub invocation: Invocation,
}

/// Ordered steps produced for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub task: Task,
    pub steps: Vec<Step>,
}

/// Path bindings supplied explicitly on the command line. `None` means the
/// configured default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub src: Option<PathBuf>,
    pub package: Option<PathBuf>,
    pub out_prefix: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub package_out: Option<PathBuf>,
    pub missing_report: Option<PathBuf>,
    pub fixed_out: Option<PathBuf>,
    pub fix_log: Option<PathBuf>,
    pub max_rows: Option<u32>,
}

/// Effective bindings for one run, fixed before any program starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub src: PathBuf,
    /// Relation table the conversion step reads when run on its own.
    pub relation: PathBuf,
    /// Relation table the repair step reads.
    pub repair_input: PathBuf,
    pub out_prefix: PathBuf,
    pub images_dir: PathBuf,
    pub package_out: PathBuf,
    pub missing_report: PathBuf,
    pub fixed_out: PathBuf,
    pub fix_log: PathBuf,
    pub max_rows: u32,
}

/// How a single step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    /// Exited with a non-zero code.
    Failed(i32),
    /// Terminated without an exit code (for example by a signal).
    Terminated,
    /// The program could not be started.
    LaunchFailed(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub kind: StepKind,
    pub outcome: StepOutcome,
}

/// Outcome of every step of one task run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub task: Task,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| !step.outcome.is_success())
            .count()
    }

    pub fn succeeded(&self) -> bool {
        self.failed() == 0
    }
}
