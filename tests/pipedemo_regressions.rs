use std::process::Command;

/// The demo pipes `ls -ls` into `wc`; with a controlled directory the line
/// count is deterministic: one `total` line plus one line per entry.
#[cfg(unix)]
#[test]
fn demo_counts_directory_listing_lines() {
    let dir = std::env::temp_dir().join(format!("jobsh-pipedemo-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.txt"), "a\n").unwrap();
    std::fs::write(dir.join("b.txt"), "b\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pipedemo"))
        .current_dir(&dir)
        .output()
        .expect("run pipedemo");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr was: {stderr}");
    assert_eq!(
        stdout.split_whitespace().next(),
        Some("3"),
        "stdout was: {stdout}"
    );
    assert!(
        stderr.contains("(parent_process>exiting...)"),
        "stderr was: {stderr}"
    );
    assert!(
        stderr.contains("(parent_process>created process with id:"),
        "stderr was: {stderr}"
    );

    let _ = std::fs::remove_dir_all(&dir);
}
