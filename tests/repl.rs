//! End-to-end tests driving the `dsh` binary through a pipe.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Held while writing fixture scripts and while spawning, so no child inherits
// a script that is still open for writing (ETXTBSY).
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn lock_spawn() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|err| err.into_inner())
}

fn run_shell(input: &str, dir: &Path) -> Output {
    run_shell_with(input, dir, |_| {})
}

fn run_shell_with(input: &str, dir: &Path, configure: impl FnOnce(&mut Command)) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dsh"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    configure(&mut cmd);

    let mut child = {
        let _lock = lock_spawn();
        cmd.spawn().expect("failed to start dsh")
    };

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write to dsh");

    child.wait_with_output().expect("failed to wait for dsh")
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let _lock = lock_spawn();
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn exit_terminates_with_status_zero() {
    let tmp = TempDir::new().unwrap();
    let output = run_shell("exit\npwd\n", tmp.path());

    assert_eq!(output.status.code(), Some(0));
    // Nothing after `exit` runs.
    assert!(!stdout_of(&output).contains(&tmp.path().display().to_string()));
}

#[test]
fn end_of_input_terminates_with_status_zero() {
    let tmp = TempDir::new().unwrap();
    let output = run_shell("", tmp.path());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn pwd_prints_working_directory() {
    let tmp = TempDir::new().unwrap();
    let canonical = fs::canonicalize(tmp.path()).unwrap();
    let output = run_shell("pwd\n", tmp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout_of(&output).contains(&canonical.display().to_string()),
        "stdout: {}",
        stdout_of(&output)
    );
}

#[test]
fn cd_changes_directory_for_later_commands() {
    let tmp = TempDir::new().unwrap();
    let canonical = fs::canonicalize(tmp.path()).unwrap();
    fs::create_dir(canonical.join("inner")).unwrap();

    let output = run_shell("cd inner\npwd\ncd\npwd\n", &canonical);

    let stdout = stdout_of(&output);
    assert!(stdout.contains(&canonical.join("inner").display().to_string()));
    assert!(stdout.contains(&format!("{}\n", canonical.display())));
}

#[test]
fn failures_are_reported_and_the_shell_continues() {
    let tmp = TempDir::new().unwrap();
    let canonical = fs::canonicalize(tmp.path()).unwrap();
    let input = "no-such-command-dsh\n/no/such/path\ncd /no/such/dir\npwd\n";
    let output = run_shell(input, &canonical);

    assert_eq!(output.status.code(), Some(0));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("no-such-command-dsh: command not found"), "stderr: {}", stderr);
    assert!(stderr.contains("/no/such/path: file not found or not executable"), "stderr: {}", stderr);
    assert!(stderr.contains("cd: /no/such/dir"), "stderr: {}", stderr);
    assert!(stdout_of(&output).contains(&canonical.display().to_string()));
}

#[test]
fn blank_lines_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let output = run_shell("\n   \n\t\nexit\n", tmp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).is_empty(), "stderr: {}", stderr_of(&output));
}

#[test]
fn non_utf8_environment_is_accepted_and_passed_on() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();
    let canonical = fs::canonicalize(tmp.path()).unwrap();
    let script = write_script(&canonical, "has-langish", r#"[ -n "$LANGISH" ] && echo langish-set"#);

    let input = format!("pwd\n{}\nexit\n", script.display());
    let output = run_shell_with(&input, &canonical, |cmd| {
        cmd.env("LANGISH", OsStr::from_bytes(b"caf\xe9"));
    });

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains(&canonical.display().to_string()), "stdout: {}", stdout);
    assert!(stdout.contains("langish-set"), "stdout: {}", stdout);
}

/// Soft and hard "Max processes" values from a `/proc/<pid>/limits` dump.
#[cfg(target_os = "linux")]
fn max_processes(limits: &str) -> Option<(String, String)> {
    let line = limits.lines().find(|line| line.starts_with("Max processes"))?;
    let mut fields = line.split_whitespace().skip(2);
    Some((fields.next()?.to_string(), fields.next()?.to_string()))
}

#[cfg(target_os = "linux")]
#[test]
fn process_limit_is_installed_and_clamped_to_hard_limit() {
    let own = fs::read_to_string("/proc/self/limits").unwrap();
    let (_, hard) = max_processes(&own).expect("no Max processes line");
    let expected = match hard.parse::<u64>() {
        Ok(hard) => hard.min(250).to_string(),
        Err(_) => "250".to_string(), // unlimited
    };

    let tmp = TempDir::new().unwrap();
    let canonical = fs::canonicalize(tmp.path()).unwrap();
    let script = write_script(&canonical, "show-limits", "cat /proc/self/limits");

    let output = run_shell(&format!("{}\nexit\n", script.display()), &canonical);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    let (soft, hard) = max_processes(&stdout).expect("no Max processes line in child output");
    assert_eq!(soft, expected, "stdout: {}", stdout);
    assert_eq!(hard, expected, "stdout: {}", stdout);
}
