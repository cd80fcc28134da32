//! Translates a task into the ordered tool invocations it needs.

use std::path::Path;

use serde::Serialize;

use crate::yinbao::tools::config::Settings;
use crate::yinbao::tools::model::{Invocation, Plan, ResolvedPaths, Step, StepKind, Task};

/// Builds the plan for `task`. Nothing is executed and the filesystem is not
/// consulted; all decisions were taken when `paths` was resolved.
pub fn build_plan(task: Task, paths: &ResolvedPaths, settings: &Settings) -> Plan {
    let steps = match task {
        Task::Clean => vec![clean_step(paths, settings)],
        Task::Images => vec![images_step(paths, settings)],
        Task::Package => vec![convert_step(&paths.relation, paths, settings)],
        Task::FixNames => vec![repair_step(paths, settings)],
        // Conversion reads what the repair step writes, not whatever was on
        // disk when the run started.
        Task::All => vec![
            repair_step(paths, settings),
            clean_step(paths, settings),
            images_step(paths, settings),
            convert_step(&paths.fixed_out, paths, settings),
        ],
    };
    Plan { task, steps }
}

fn tool(settings: &Settings, script: &Path) -> Invocation {
    Invocation::new(&settings.interpreter).arg(settings.script(script))
}

fn clean_step(paths: &ResolvedPaths, settings: &Settings) -> Step {
    let invocation = tool(settings, &settings.tools.clean)
        .flag("--src", &paths.src)
        .flag("--out_prefix", &paths.out_prefix)
        .flag("--max_rows", paths.max_rows.to_string());
    Step {
        kind: StepKind::Clean,
        invocation,
    }
}

fn images_step(paths: &ResolvedPaths, settings: &Settings) -> Step {
    let invocation = tool(settings, &settings.tools.images)
        .flag("--src", &paths.src)
        .flag("--out_dir", &paths.images_dir);
    Step {
        kind: StepKind::DownloadImages,
        invocation,
    }
}

fn convert_step(relation: &Path, paths: &ResolvedPaths, settings: &Settings) -> Step {
    let invocation = tool(settings, &settings.tools.convert)
        .flag("--src", relation)
        .flag("--out", &paths.package_out)
        .flag("--products", &paths.src)
        .flag("--missing-report", &paths.missing_report);
    Step {
        kind: StepKind::ConvertRelation,
        invocation,
    }
}

fn repair_step(paths: &ResolvedPaths, settings: &Settings) -> Step {
    let invocation = tool(settings, &settings.tools.repair)
        .flag("--relation", &paths.repair_input)
        .flag("--products", &paths.src)
        .flag("--out", &paths.fixed_out)
        .flag("--log", &paths.fix_log);
    Step {
        kind: StepKind::RepairNames,
        invocation,
    }
}

/// Serializable view of a step, used for dry-run output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub step: StepKind,
    pub program: String,
    pub args: Vec<String>,
}

impl From<&Step> for PlanEntry {
    fn from(step: &Step) -> Self {
        Self {
            step: step.kind,
            program: step.invocation.program.display().to_string(),
            args: step
                .invocation
                .args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Renders the plan as JSON lines, one object per step.
pub fn plan_to_json_lines(plan: &Plan) -> serde_json::Result<String> {
    let mut out = String::new();
    for step in &plan.steps {
        out.push_str(&serde_json::to_string(&PlanEntry::from(step))?);
        out.push('\n');
    }
    Ok(out)
}
