use std::process::{Command, Output};

fn ls8(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ls8"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .unwrap()
}

#[test]
fn trace_logs_stay_off_stdout() {
    let output = ls8(&["--trace", "demos/print8.ls8"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "8\n");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TRACE: 00 | 82 00 08 |"));
    assert!(stderr.contains("LDI R0,8"));
}

#[test]
fn verbose_run_prints_only_program_output() {
    let output = ls8(&["-v", "demos/call.ls8"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "20\n30\n36\n60\n");
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("halted after 22 steps"));
}

#[test]
fn step_limit_warning_goes_to_stderr() {
    let output = ls8(&["--max-steps", "2", "demos/call.ls8"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("after 2 steps"));
}

#[test]
fn missing_program_argument_is_a_usage_error() {
    let output = ls8(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
