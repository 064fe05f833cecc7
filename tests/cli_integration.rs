use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_blocklz").to_string()
}

#[test]
fn cli_compress_decompress_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let packed = dir.path().join("input.blz");
    let output = dir.path().join("output.bin");

    let data = b"abcde12345abcde12345abcde12345!".repeat(50);
    std::fs::write(&input, &data).unwrap();

    let st = Command::new(bin())
        .args(["compress", "--level", "high"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());
    assert!(std::fs::metadata(&packed).unwrap().len() < data.len() as u64);

    let st = Command::new(bin())
        .arg("decompress")
        .arg(&packed)
        .arg(&output)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&output).unwrap(), data);
}

#[test]
fn cli_stdin_to_stdout() {
    let data = b"piped piped piped piped data".to_vec();

    let mut child = Command::new(bin())
        .arg("compress")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&data).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let mut child = Command::new(bin())
        .args(["decompress", "--size-hint", "1K"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&out.stdout).unwrap();
    let back = child.wait_with_output().unwrap();
    assert!(back.status.success());
    assert_eq!(back.stdout, data);
}

#[test]
fn cli_refuses_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let existing = dir.path().join("out.blz");
    std::fs::write(&input, b"payload payload").unwrap();
    std::fs::write(&existing, b"keep me").unwrap();

    let st = Command::new(bin())
        .arg("compress")
        .arg(&input)
        .arg(&existing)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");

    let st = Command::new(bin())
        .args(["--force", "compress"])
        .arg(&input)
        .arg(&existing)
        .status()
        .unwrap();
    assert!(st.success());
    assert_ne!(std::fs::read(&existing).unwrap(), b"keep me");
}

#[test]
fn cli_no_output_flag() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    std::fs::write(&input, b"payload").unwrap();

    let out = Command::new(bin())
        .args(["compress", "--check-only"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_corrupt_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.blz");
    std::fs::write(&input, [0x01u8, 0x00]).unwrap();

    let out = Command::new(bin())
        .args(["decompress", "-c"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("corrupt stream"), "{stderr}");
}

#[test]
fn cli_inspect_lists_tokens() {
    let dir = tempdir().unwrap();
    let packed = dir.path().join("a.blz");
    std::fs::write(&packed, blocklz::encode(&[0x41u8; 1000], blocklz::Level::Fast).unwrap())
        .unwrap();

    let out = Command::new(bin()).arg("inspect").arg(&packed).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].contains("LIT") && lines[0].contains("len=1"));
    assert!(lines[1].contains("REF") && lines[1].contains("dist=1 len=999"));
}

#[test]
fn cli_json_stats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    std::fs::write(&input, vec![7u8; 4096]).unwrap();

    let out = Command::new(bin())
        .args(["--json", "compress", "--check-only", "--level", "fast"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(stats["command"], "compress");
    assert_eq!(stats["level"], "fast");
    assert_eq!(stats["input_size"], 4096);
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Format version: 1"), "{stdout}");
}
