use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yinbao_tools::config::Settings;
use yinbao_tools::dispatch::run_task;
use yinbao_tools::io::probe::HostFilesystem;
use yinbao_tools::io::process::ProcessRunner;
use yinbao_tools::menu::{self, MenuChoice};
use yinbao_tools::model::{Overrides, Task};
use yinbao_tools::plan::{build_plan, plan_to_json_lines};
use yinbao_tools::resolve::resolve_paths;
use yinbao_tools::{Result, ToolError};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    let settings = Settings::load(cli.config.as_deref())?;

    let task = match cli.task {
        Some(task) => task,
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let choice = menu::prompt(&mut stdin.lock(), &mut stdout)?;
            match choice {
                MenuChoice::Run(task) => task,
                MenuChoice::Exit => {
                    writeln!(stdout, "Bye.")?;
                    return Ok(());
                }
            }
        }
    };

    let overrides = cli.overrides();
    if cli.dry_run {
        let paths = resolve_paths(&settings, &overrides, &HostFilesystem);
        let plan = build_plan(task, &paths, &settings);
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", plan_to_json_lines(&plan)?)?;
        stdout.flush()?;
        return Ok(());
    }

    let report = run_task(task, &settings, &overrides, &HostFilesystem, &mut ProcessRunner);
    info!(task = %report.task, failed = report.failed(), steps = report.steps.len(), "finished");

    if cli.strict && !report.succeeded() {
        return Err(ToolError::StepsFailed {
            failed: report.failed(),
            total: report.steps.len(),
        });
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yinbao_tools=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Run the product cleaning, image download and package relation tools."
)]
struct Cli {
    /// Task to run: clean, images, package, all or fixnames. Without it an
    /// interactive menu is shown.
    #[arg(long, value_parser = Task::from_str)]
    task: Option<Task>,

    /// Product source spreadsheet.
    #[arg(long)]
    src: Option<PathBuf>,

    /// Package relation input. Skips the repaired/original fallback.
    #[arg(long)]
    package: Option<PathBuf>,

    /// Output prefix for the cleaned product files.
    #[arg(long)]
    out_prefix: Option<PathBuf>,

    /// Converted package relation output.
    #[arg(long)]
    package_out: Option<PathBuf>,

    /// Missing barcode report output.
    #[arg(long)]
    missing_report: Option<PathBuf>,

    /// Repaired relation table output.
    #[arg(long)]
    fixed_out: Option<PathBuf>,

    /// Repair log output.
    #[arg(long)]
    fix_log: Option<PathBuf>,

    /// Directory for downloaded images.
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Maximum rows per cleaned output file.
    #[arg(long)]
    max_rows: Option<u32>,

    /// TOML file replacing the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the planned commands as JSON lines without running them.
    #[arg(long)]
    dry_run: bool,

    /// Exit with a failure status when any step fails.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            src: self.src.clone(),
            package: self.package.clone(),
            out_prefix: self.out_prefix.clone(),
            images_dir: self.images_dir.clone(),
            package_out: self.package_out.clone(),
            missing_report: self.missing_report.clone(),
            fixed_out: self.fixed_out.clone(),
            fix_log: self.fix_log.clone(),
            max_rows: self.max_rows,
        }
    }
}
