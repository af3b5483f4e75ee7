use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn unknown_function_reports_available_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("tools.py");
    fs::write(&file_path, "def alpha():\n    pass\n\ndef beta():\n    pass\n")?;

    let output = Command::new(env!("CARGO_BIN_EXE_toolgen"))
        .args(["generate", file_path.to_string_lossy().as_ref(), "gamma"])
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("gamma"));
    assert!(stderr.contains("alpha, beta"));
    Ok(())
}

#[test]
fn source_without_functions_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("nothing.py");
    fs::write(&file_path, "VALUE = 42\n")?;

    let output = Command::new(env!("CARGO_BIN_EXE_toolgen"))
        .args(["generate", file_path.to_string_lossy().as_ref()])
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("no function definition found"));
    Ok(())
}

#[test]
fn missing_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_toolgen"))
        .args(["generate", "/tmp/definitely-missing-toolgen-input.py"])
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("failed to read"));
    Ok(())
}
