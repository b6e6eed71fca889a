// Integration tests for the modeldesk binary

use std::process::{Command, Output};

fn modeldesk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modeldesk"))
        .args(args)
        .env("MODELDESK_MODELS_DIR", "does-not-exist")
        .output()
        .expect("Failed to run modeldesk")
}

#[test]
fn test_version_display() {
    let output = modeldesk(&["--version"]);
    assert!(output.status.success(), "Version command failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("modeldesk"), "Expected 'modeldesk' in version output");
}

#[test]
fn test_help_display() {
    let output = modeldesk(&["--help"]);
    assert!(output.status.success(), "Help command failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run") && stdout.contains("studio") && stdout.contains("list"),
            "Expected run, studio and list in help output");
}

#[test]
fn test_help_subcommand() {
    let output = modeldesk(&["help", "run"]);
    assert!(output.status.success(), "Help subcommand failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--model"), "Expected run options in help output");
}

#[test]
fn test_list_shows_every_model() {
    let output = modeldesk(&["list"]);
    assert!(output.status.success(), "List command failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Text-to-Image (SD-Turbo)"));
    assert!(stdout.contains("Image Classification (ViT-Base-16)"));
    assert!(stdout.contains("missing"), "Models should be reported missing");
}

#[test]
fn test_unknown_model_is_rejected() {
    let output = modeldesk(&["run", "-m", "Text Generation (distilgpt2)", "--prompt", "hi"]);
    assert!(!output.status.success(), "Unknown model should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown model selection"), "stderr was: {}", stderr);
}

#[test]
fn test_classification_requires_image() {
    let output = modeldesk(&["run", "-m", "Image Classification (ViT-Base-16)"]);
    assert!(!output.status.success(), "Classification without an image should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--image"), "stderr was: {}", stderr);
}

#[test]
fn test_unused_flag_is_warned() {
    let output = modeldesk(&["run", "-m", "Image Classification (ViT-Base-16)", "--prompt", "a red fox"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("does not use --prompt"), "stdout was: {}", stdout);
}

#[test]
fn test_missing_weights_fail_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let dir = dir.path().to_str().unwrap();
    let output = modeldesk(&["--models-dir", dir, "run", "-m", "Text-to-Image (SD-Turbo)", "--prompt", "fox"]);
    assert!(!output.status.success(), "Load without model files should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tokenizer"), "stderr was: {}", stderr);
}

#[test]
fn test_studio_session_script() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_modeldesk"))
        .arg("studio")
        .env("MODELDESK_MODELS_DIR", "does-not-exist")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to start studio");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"run\nselect 2\nsave\nselect 9\nexit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "Studio should exit cleanly");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please load a model first."));
    assert!(stdout.contains("Image Classification (ViT-Base-16)"));
    assert!(stdout.contains("No generated image to save."));
    assert!(stdout.contains("Unknown model selection"));
    assert!(stdout.contains("Goodbye!"));
}
