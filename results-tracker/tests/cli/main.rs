// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests that invoke the `results-tracker` binary.

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use results_metadata::TrackerExitCode;
use std::process::{Command, Output};
use test_case::test_case;

const REPORT: &str = indoc! {r#"
    {
      "numFailedTests": 1,
      "numPassedTests": 1,
      "numPendingTests": 0,
      "testResults": [
        {
          "name": "/qa/tests/stp-operations-tests.js",
          "testResults": [
            {
              "title": "STP-001: submits a transfer",
              "ancestorTitles": ["STP Operations"],
              "status": "passed",
              "duration": 88,
              "failureMessages": []
            },
            {
              "title": "BATCH-001: rejects an empty batch",
              "ancestorTitles": ["STP Operations"],
              "status": "failed",
              "duration": 41,
              "failureMessages": ["expect(received).toBe(expected)\n\nExpected: 400\nReceived: 500"]
            }
          ]
        }
      ]
    }
"#};

struct TempProject {
    dir: Utf8TempDir,
}

impl TempProject {
    fn new() -> Self {
        Self {
            dir: Utf8TempDir::new().expect("created temp dir"),
        }
    }

    fn root(&self) -> &Utf8Path {
        self.dir.path()
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.root().join(name)
    }

    fn write(&self, name: &str, contents: &str) {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("created parent dir");
        }
        std::fs::write(&path, contents).expect("wrote file");
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("file exists")
    }

    fn run(&self, args: &[&str]) -> CliOutput {
        let mut command = Command::new(env!("CARGO_BIN_EXE_results-tracker"));
        command.current_dir(self.root()).args(args);
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("RESULTS_TRACKER_") {
                command.env_remove(key);
            }
        }
        command.env("RESULTS_TRACKER_COLOR", "never");

        let output = command.output().expect("results-tracker ran");
        CliOutput::new(output)
    }
}

struct CliOutput {
    code: Option<i32>,
    stderr: String,
}

impl CliOutput {
    fn new(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    fn assert_code(&self, expected: i32) {
        assert_eq!(self.code, Some(expected), "stderr:\n{}", self.stderr);
    }
}

#[test]
fn default_paths() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::OK);
    assert!(
        output
            .stderr
            .contains("info: test results markdown generated at test-results.md"),
        "{}",
        output.stderr
    );

    let markdown = project.read("test-results.md");
    assert!(markdown.starts_with("# AddVantage API Test Results\n\n**Generated:** "));
    assert!(
        markdown.contains(
            "| BATCH-001 | BATCH-001: rejects an empty batch | ❌ FAIL | 41 | \
             expect(received).toBe(expected)  Expected: 400 Received: 500... |\n"
        ),
        "{markdown}"
    );
    assert!(
        markdown.contains("| STP-001 | STP-001: submits a transfer | ✅ PASS | 88 |  |\n"),
        "{markdown}"
    );
}

#[test]
fn missing_report() {
    let project = TempProject::new();

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::REPORT_NOT_FOUND);
    assert!(
        output
            .stderr
            .contains("error: test report not found at test-report.json"),
        "{}",
        output.stderr
    );
    assert!(
        output.stderr.contains("npm run test:report"),
        "{}",
        output.stderr
    );
    assert!(!project.path("test-results.md").exists());
}

#[test]
fn missing_report_keeps_previous_output() {
    let project = TempProject::new();
    project.write("test-results.md", "previous results\n");

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::REPORT_NOT_FOUND);
    assert_eq!(project.read("test-results.md"), "previous results\n");
}

#[test]
fn malformed_report() {
    let project = TempProject::new();
    project.write("test-report.json", r#"{"numFailedTests": "many"}"#);

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::REPORT_PARSE_FAILED);
    assert!(
        output.stderr.contains("Caused by:\n  numFailedTests:"),
        "{}",
        output.stderr
    );
    assert!(!project.path("test-results.md").exists());
}

#[test]
fn unwritable_output() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);
    project.write("blocker", "");

    let output = project.run(&["--output", "blocker/test-results.md"]);
    output.assert_code(TrackerExitCode::WRITE_OUTPUT_ERROR);
    assert!(
        output.stderr.contains("failed to write results to blocker"),
        "{}",
        output.stderr
    );
}

#[test]
fn unwritable_output_skips_json_summary() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);
    project.write("blocker", "");

    let output = project.run(&[
        "--output",
        "blocker/test-results.md",
        "--json-summary",
        "test-results.json",
    ]);
    output.assert_code(TrackerExitCode::WRITE_OUTPUT_ERROR);
    assert!(!project.path("test-results.json").exists());
}

#[test]
fn config_file_in_working_directory() {
    let project = TempProject::new();
    project.write("reports/test-report.json", REPORT);
    project.write(
        "results-tracker.toml",
        indoc! {r#"
            [report]
            input = "reports/test-report.json"
            output = "reports/test-results.md"
            json-summary = "reports/test-results.json"
            title = "Nightly Results"
            unknown-key = true

            [criteria]
            mode = "per-category"
        "#},
    );

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::OK);
    assert!(
        output
            .stderr
            .contains("warning: in config file results-tracker.toml, ignoring unknown configuration key: report.unknown-key"),
        "{}",
        output.stderr
    );

    let markdown = project.read("reports/test-results.md");
    assert!(markdown.starts_with("# Nightly Results\n"), "{markdown}");
    // Only the STP criterion and the cross-cutting criterion fail.
    assert_eq!(markdown.matches("| ❌ FAIL |\n").count(), 2, "{markdown}");
    assert!(project.path("reports/test-results.json").exists());
    assert!(!project.path("test-results.md").exists());
}

#[test]
fn flags_override_config_file() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);
    project.write(
        "results-tracker.toml",
        indoc! {r#"
            [report]
            output = "from-config.md"
            title = "From config"
        "#},
    );

    let output = project.run(&["--output", "from-flag.md"]);
    output.assert_code(TrackerExitCode::OK);
    assert!(!project.path("from-config.md").exists());
    assert!(
        project
            .read("from-flag.md")
            .starts_with("# From config\n")
    );
}

#[test_case(&["--config-file", "none"] ; "flag")]
#[test_case(&["--config-file=none", "--criteria-mode", "global"] ; "flag with default mode")]
fn config_file_none_skips_config(args: &[&str]) {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);
    project.write("results-tracker.toml", "[report]\noutput = \"from-config.md\"\n");

    let output = project.run(args);
    output.assert_code(TrackerExitCode::OK);
    assert!(project.path("test-results.md").exists());
    assert!(!project.path("from-config.md").exists());
}

#[test]
fn explicit_config_file_missing() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);

    let output = project.run(&["--config-file", "ci/results-tracker.toml"]);
    output.assert_code(TrackerExitCode::SETUP_ERROR);
    assert!(
        output.stderr.contains("config file `ci/results-tracker.toml` not found"),
        "{}",
        output.stderr
    );
    assert!(!project.path("test-results.md").exists());
}

#[test]
fn invalid_config_file() {
    let project = TempProject::new();
    project.write("test-report.json", REPORT);
    project.write("results-tracker.toml", "[criteria]\nmode = 3\n");

    let output = project.run(&[]);
    output.assert_code(TrackerExitCode::SETUP_ERROR);
    assert!(
        output.stderr.contains("failed to parse config file"),
        "{}",
        output.stderr
    );
}
