use std::process::Command;

fn nqueens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nqueens-mw"))
}

#[test]
fn test_cli_cluster_count() {
    let output = nqueens()
        .args(["8", "-k", "2", "-j", "3"])
        .output()
        .expect("Failed to execute nqueens-mw");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("solutions: 92"), "stdout: {}", stdout);
}

#[test]
fn test_cli_prints_solutions() {
    let output = nqueens()
        .args(["4", "-k", "1", "-j", "2", "--wait", "polling", "--print"])
        .output()
        .expect("Failed to execute nqueens-mw");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 3 0 2"));
    assert!(stdout.contains("2 0 3 1"));
    assert!(stdout.contains("solutions: 2"));
}

#[test]
fn test_cli_sequential() {
    let output = nqueens()
        .args(["6", "--sequential"])
        .output()
        .expect("Failed to execute nqueens-mw");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("solutions: 4"));
}

#[test]
fn test_cli_rejects_split_beyond_board() {
    let output = nqueens()
        .args(["4", "-k", "5"])
        .output()
        .expect("Failed to execute nqueens-mw");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "stderr: {}", stderr);
}
