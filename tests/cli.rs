use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("yinbao-tools").expect("binary built");
    cmd.env("RUST_LOG", "yinbao_tools=info");
    cmd
}

#[test]
fn invalid_menu_choice_exits_with_error() {
    cli()
        .write_stdin("9\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid menu choice '9'"))
        .stderr(predicate::str::contains("running step").not());
}

#[test]
fn menu_exit_choice_succeeds() {
    cli()
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Select a task:"))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn unknown_task_is_rejected_by_argument_parsing() {
    cli()
        .args(["--task", "export"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown task 'export'"));
}

#[test]
fn dry_run_prints_custom_out_prefix() {
    cli()
        .args(["--task", "clean", "--out-prefix", "exports/batch_a", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""step":"clean""#))
        .stdout(predicate::str::contains(r#""--out_prefix","exports/batch_a""#));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp_dir = tempfile::tempdir().expect("temporary directory");
    cli()
        .args(["--task", "clean", "--dry-run", "--config"])
        .arg(temp_dir.path().join("absent.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("input file not found"));
}

#[cfg(unix)]
#[test]
fn dry_run_into_closed_pipe_reports_error() {
    use std::process::{Command as StdCommand, Stdio};

    let (reader, writer) = std::io::pipe().expect("pipe created");
    drop(reader);

    let output = StdCommand::new(assert_cmd::cargo::cargo_bin("yinbao-tools"))
        .args(["--task", "all", "--dry-run"])
        .stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .output()
        .expect("binary ran");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("error: I/O error"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

#[cfg(unix)]
mod with_fake_tools {
    use std::fs;
    use std::path::Path;

    use predicates::prelude::*;
    use tempfile::{TempDir, tempdir};

    use super::cli;

    /// Lays out a tools directory of shell scripts that append their name and
    /// arguments to `calls.log`, and a config pointing at it.
    fn workspace(failing: &str) -> TempDir {
        let temp_dir = tempdir().expect("temporary directory");
        let root = temp_dir.path();
        let tools = root.join("tools");
        fs::create_dir_all(&tools).expect("tools directory");

        for name in ["repair", "clean", "images", "convert"] {
            let status = if name == failing { 3 } else { 0 };
            let body = format!(
                "printf '%s\\n' \"{name} $*\" >> \"$CALLS_LOG\"\nexit {status}\n"
            );
            fs::write(tools.join(format!("{name}.sh")), body).expect("script written");
        }

        let config = format!(
            r#"interpreter = "sh"
tools_dir = "{tools}"

[paths]
product_source = "{root}/products.xlsx"
relation_original = "{root}/relation.xlsx"
relation_fixed = "{root}/relation_fixed.xlsx"

[tools]
clean = "clean.sh"
images = "images.sh"
convert = "convert.sh"
repair = "repair.sh"
"#,
            tools = tools.display(),
            root = root.display(),
        );
        fs::write(root.join("tools.toml"), config).expect("config written");
        temp_dir
    }

    fn calls(root: &Path) -> Vec<String> {
        fs::read_to_string(root.join("calls.log"))
            .expect("calls log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn all_runs_every_step_in_order_despite_failure() {
        let temp_dir = workspace("convert");
        let root = temp_dir.path();

        cli()
            .env("CALLS_LOG", root.join("calls.log"))
            .args(["--task", "all", "--config"])
            .arg(root.join("tools.toml"))
            .assert()
            .success()
            .stderr(predicate::str::contains("non-zero status"));

        let calls = calls(root);
        let names: Vec<&str> = calls
            .iter()
            .map(|line| line.split(' ').next().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["repair", "clean", "images", "convert"]);
        let fixed = format!("{}/relation_fixed.xlsx", root.display());
        assert!(calls[0].contains(&format!("--out {fixed}")));
        assert!(calls[3].contains(&format!("--src {fixed}")));
    }

    #[test]
    fn strict_mode_reports_failed_steps() {
        let temp_dir = workspace("clean");
        let root = temp_dir.path();

        cli()
            .env("CALLS_LOG", root.join("calls.log"))
            .args(["--task", "all", "--strict", "--config"])
            .arg(root.join("tools.toml"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("1 of 4 step(s) failed"));

        assert_eq!(calls(root).len(), 4);
    }

    #[test]
    fn dry_run_launches_nothing() {
        let temp_dir = workspace("");
        let root = temp_dir.path();

        cli()
            .env("CALLS_LOG", root.join("calls.log"))
            .args(["--task", "all", "--dry-run", "--config"])
            .arg(root.join("tools.toml"))
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""step":"convert_relation""#));

        assert!(!root.join("calls.log").exists());
    }

    #[test]
    fn invalid_menu_choice_launches_nothing() {
        let temp_dir = workspace("");
        let root = temp_dir.path();

        cli()
            .env("CALLS_LOG", root.join("calls.log"))
            .args(["--config"])
            .arg(root.join("tools.toml"))
            .write_stdin("9\n")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("invalid menu choice '9'"));

        assert!(!root.join("calls.log").exists());
    }

    #[test]
    fn interactive_choice_runs_the_selected_task() {
        let temp_dir = workspace("");
        let root = temp_dir.path();

        cli()
            .env("CALLS_LOG", root.join("calls.log"))
            .args(["--config"])
            .arg(root.join("tools.toml"))
            .write_stdin("2\n")
            .assert()
            .success();

        let calls = calls(root);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("images "));
        assert!(calls[0].contains("--out_dir data/images"));
    }
}
