use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::yinbao::tools::config::Settings;
use crate::yinbao::tools::io::probe::PathProbe;
use crate::yinbao::tools::model::{Overrides, ResolvedPaths};

/// Picks the relation table a run operates on.
///
/// An explicit path always wins. Otherwise the repaired table is used when it
/// exists at call time, falling back to the original table. Nothing is
/// created, moved or inspected beyond the existence check.
pub fn resolve_relation_path(
    explicit: Option<&Path>,
    repaired_candidate: &Path,
    original_fallback: &Path,
    probe: &impl PathProbe,
) -> PathBuf {
    if let Some(explicit) = explicit {
        debug!(path = %explicit.display(), "using explicit relation table");
        return explicit.to_path_buf();
    }
    if probe.exists(repaired_candidate) {
        debug!(path = %repaired_candidate.display(), "using repaired relation table");
        return repaired_candidate.to_path_buf();
    }
    debug!(
        path = %original_fallback.display(),
        missing = %repaired_candidate.display(),
        "repaired relation table not found, using original"
    );
    original_fallback.to_path_buf()
}

/// Binds every path role for one run, applying overrides over the configured
/// defaults. Filesystem state is observed here and nowhere later in the run.
#[instrument(level = "debug", skip_all)]
pub fn resolve_paths(
    settings: &Settings,
    overrides: &Overrides,
    probe: &impl PathProbe,
) -> ResolvedPaths {
    let defaults = &settings.paths;
    let pick = |explicit: &Option<PathBuf>, default: &PathBuf| {
        explicit.clone().unwrap_or_else(|| default.clone())
    };

    let fixed_out = pick(&overrides.fixed_out, &defaults.relation_fixed);
    let relation = resolve_relation_path(
        overrides.package.as_deref(),
        &fixed_out,
        &defaults.relation_original,
        probe,
    );

    ResolvedPaths {
        src: pick(&overrides.src, &defaults.product_source),
        relation,
        repair_input: pick(&overrides.package, &defaults.relation_original),
        out_prefix: pick(&overrides.out_prefix, &defaults.out_prefix),
        images_dir: pick(&overrides.images_dir, &defaults.images_dir),
        package_out: pick(&overrides.package_out, &defaults.package_out),
        missing_report: pick(&overrides.missing_report, &defaults.missing_report),
        fixed_out,
        fix_log: pick(&overrides.fix_log, &defaults.fix_log),
        max_rows: overrides.max_rows.unwrap_or(settings.max_rows),
    }
}
