use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cli(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("closure-minify").expect("binary should build");
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("CLOSURE_MINIFY_JAVA")
        .env_remove("CLOSURE_COMPILER_JAR");
    cmd
}

// Helper function to run CLI command and return output
fn run_cli(args: &[&str], cwd: &Path) -> std::process::Output {
    cli(cwd).args(args).output().expect("Failed to execute command")
}

const MODULE: &str = "\
function Module(x) {
{@dev
    if (typeof x !== \"number\") { throw new TypeError(\"x\"); }
}@dev
    {@debug console.log(x); }@debug
    return x * 2;
}
{@assert
Module.assert = function() {};
}@assert
{@trace Module.trace = true; }@trace
";

#[test]
fn test_nocompile_strips_default_labels() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Module.js"), MODULE).unwrap();

    let output = run_cli(&["--source", "Module.js", "--output", "out.js", "--nocompile"], temp_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().is_empty());

    let actual = fs::read_to_string(temp_dir.path().join("out.js")).unwrap();
    let expected = "function Module(x) {\n \n     \n    return x * 2;\n}\n \n{@trace Module.trace = true; }@trace\n";
    assert_eq!(actual, expected);
}

#[test]
fn test_custom_labels() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.js"), "a(); {@trace t(); }@trace {@perf p(); }@perf b();").unwrap();

    let output = run_cli(
        &["@trace", "--label", "perf", "--source", "a.js", "--output", "out.js", "--nocompile"],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let actual = fs::read_to_string(temp_dir.path().join("out.js")).unwrap();
    assert_eq!(actual, "a();     b();");
}

#[test]
fn test_header_and_footer_are_stripped_too() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("head.js"), "(function(){ {@dev var DEV = 1; }@dev\n").unwrap();
    fs::write(temp_dir.path().join("foot.js"), "})();\n").unwrap();
    fs::write(temp_dir.path().join("body.js"), "var body;\n").unwrap();

    let output = run_cli(
        &[
            "--header", "head.js", "--footer", "foot.js",
            "--source", "body.js", "--output", "out.js", "--nocompile",
        ],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let actual = fs::read_to_string(temp_dir.path().join("out.js")).unwrap();
    assert_eq!(actual, "(function(){  \nvar body;\n})();\n");
}

#[test]
fn test_crlf_sources_are_normalized() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("win.js"), "var a;\r\n{@dev\r\nlog(a);\r\n}@dev\r\nvar b;\r\n").unwrap();
    fs::write(temp_dir.path().join("mac.js"), "var c;\r{@dev\rlog(c);\r}@dev\r").unwrap();

    let output = run_cli(
        &["--source", "win.js", "--source", "mac.js", "--output", "out.js", "--nocompile"],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let actual = fs::read_to_string(temp_dir.path().join("out.js")).unwrap();
    assert_eq!(actual, "var a;\n \nvar b;\nvar c;\n \n");
}

#[test]
fn test_glob_sources_are_sorted() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("lib")).unwrap();
    fs::write(temp_dir.path().join("lib/b.js"), "b;\n").unwrap();
    fs::write(temp_dir.path().join("lib/a.js"), "a;\n").unwrap();
    fs::write(temp_dir.path().join("main.js"), "main;\n").unwrap();

    let output = run_cli(
        &["--source", "main.js", "--source", "lib/*.js", "--output", "out.js", "--nocompile"],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let actual = fs::read_to_string(temp_dir.path().join("out.js")).unwrap();
    assert_eq!(actual, "main;\na;\nb;\n");
}

#[test]
fn test_package_option() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("lib")).unwrap();
    fs::create_dir(temp_dir.path().join("release")).unwrap();
    fs::write(temp_dir.path().join("lib/M.js"), "var M; {@dev M.dev = 1; }@dev\n").unwrap();
    fs::write(
        temp_dir.path().join("package.json"),
        r#"{ "name": "m", "webmodule": { "source": ["lib/M.js"], "output": "release/M.min.js" } }"#,
    )
    .unwrap();

    let output = run_cli(&["--package", "--nocompile"], temp_dir.path());
    assert!(output.status.success());
    let actual = fs::read_to_string(temp_dir.path().join("release/M.min.js")).unwrap();
    assert_eq!(actual, "var M;  \n");
}

#[test]
fn test_missing_source_is_reported() {
    let temp_dir = TempDir::new().unwrap();

    cli(temp_dir.path())
        .args(["--source", "missing.js", "--output", "out.js", "--nocompile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: missing.js"));
    assert!(!temp_dir.path().join("out.js").exists());
}

#[test]
fn test_sources_and_output_are_required() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.js"), "a;").unwrap();

    cli(temp_dir.path())
        .args(["--output", "out.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input source are empty."));

    cli(temp_dir.path())
        .args(["--source", "a.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output file is empty."));
}

#[test]
fn test_unknown_bare_argument() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.js"), "a;").unwrap();

    cli(temp_dir.path())
        .args(["release", "--source", "a.js", "--output", "out.js", "--nocompile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option: release"));
}

#[test]
fn test_unreadable_source_is_skipped_with_warning() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("binary.js"), [0xff, 0xfe]).unwrap();
    fs::write(temp_dir.path().join("text.js"), "text;\n").unwrap();

    let output = run_cli(
        &["--source", "binary.js", "--source", "text.js", "--output", "out.js", "--nocompile"],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Skipping binary.js"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("out.js")).unwrap(), "text;\n");
}
