use tracing::{error, info, instrument, warn};

use crate::yinbao::tools::config::Settings;
use crate::yinbao::tools::io::probe::PathProbe;
use crate::yinbao::tools::io::process::Runner;
use crate::yinbao::tools::model::{
    Invocation, Overrides, Plan, ResolvedPaths, RunReport, StepOutcome, StepReport, Task,
};
use crate::yinbao::tools::plan::build_plan;
use crate::yinbao::tools::resolve::resolve_paths;

/// Runs one invocation and turns every result into a reported outcome.
/// Non-zero exits and launch failures are logged, never propagated.
pub fn invoke(runner: &mut impl Runner, invocation: &Invocation) -> StepOutcome {
    let outcome = match runner.invoke(invocation) {
        Ok(outcome) => outcome,
        Err(err) => StepOutcome::LaunchFailed(err.to_string()),
    };
    match &outcome {
        StepOutcome::Succeeded => {}
        StepOutcome::Failed(code) => {
            warn!(code, command = %invocation.display(), "command exited with non-zero status")
        }
        StepOutcome::Terminated => {
            warn!(command = %invocation.display(), "command terminated without exit status")
        }
        StepOutcome::LaunchFailed(reason) => {
            error!(%reason, command = %invocation.display(), "command could not be started")
        }
    }
    outcome
}

/// Executes every step of `plan` in order. A failing step does not stop the
/// ones after it.
#[instrument(level = "info", skip_all, fields(task = %plan.task))]
pub fn execute(plan: &Plan, runner: &mut impl Runner) -> RunReport {
    let total = plan.steps.len();
    let mut steps = Vec::with_capacity(total);

    for (index, step) in plan.steps.iter().enumerate() {
        info!(step = %step.kind, position = index + 1, total, "running step");
        let outcome = invoke(runner, &step.invocation);
        steps.push(StepReport {
            kind: step.kind,
            outcome,
        });
    }

    let report = RunReport {
        task: plan.task,
        steps,
    };
    if report.succeeded() {
        info!(total, "all steps succeeded");
    } else {
        warn!(failed = report.failed(), total, "some steps failed");
    }
    report
}

/// Builds the plan for `task` from already resolved paths and executes it.
pub fn dispatch(
    task: Task,
    paths: &ResolvedPaths,
    settings: &Settings,
    runner: &mut impl Runner,
) -> RunReport {
    let plan = build_plan(task, paths, settings);
    execute(&plan, runner)
}

/// Resolves bindings once, then dispatches `task`.
#[instrument(level = "info", skip_all, fields(%task))]
pub fn run_task(
    task: Task,
    settings: &Settings,
    overrides: &Overrides,
    probe: &impl PathProbe,
    runner: &mut impl Runner,
) -> RunReport {
    let paths = resolve_paths(settings, overrides, probe);
    info!(relation = %paths.relation.display(), src = %paths.src.display(), "paths resolved");
    dispatch(task, &paths, settings, runner)
}
