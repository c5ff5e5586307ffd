// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the report pipeline.

use camino::Utf8PathBuf;
use camino_tempfile::Utf8TempDir;
use chrono::{DateTime, TimeZone, Utc};
use indoc::indoc;
use pretty_assertions::assert_eq;
use results_reporter::{
    config::TrackerConfig,
    criteria::CriteriaMode,
    errors::{LoadReportError, PipelineError, WriteReportError},
    pipeline::ReportPipeline,
};

const ALL_PASSED: &str = indoc! {r#"
    {
      "numFailedTests": 0,
      "numPassedTests": 2,
      "numPendingTests": 0,
      "testResults": [
        {
          "name": "/qa/tests/authentication-tests.js",
          "testResults": [
            {
              "title": "AUTH-001: accepts a valid token",
              "ancestorTitles": ["Authentication & Authorization Testing", "1.1 JWT Authentication"],
              "status": "passed",
              "duration": 12,
              "failureMessages": []
            },
            {
              "title": "AUTH-002: rejects an expired token",
              "ancestorTitles": ["Authentication & Authorization Testing", "1.1 JWT Authentication"],
              "status": "passed",
              "duration": 9,
              "failureMessages": []
            }
          ]
        }
      ]
    }
"#};

const MIXED: &str = indoc! {r#"
    {
      "numFailedTests": 1,
      "numPassedTests": 3,
      "numPendingTests": 1,
      "testResults": [
        {
          "name": "/qa/tests/rate-limiting-tests.js",
          "testResults": [
            {
              "title": "returns 429 after the limit",
              "ancestorTitles": ["Rate Limiting", "RATE-002 STP limits"],
              "status": "failed",
              "duration": 1503,
              "failureMessages": ["Expected 200 got 401\nat line 5"]
            },
            {
              "title": "RATE-001: health checks are not limited",
              "ancestorTitles": ["Rate Limiting"],
              "status": "passed",
              "duration": 220,
              "failureMessages": []
            }
          ]
        },
        {
          "name": "/qa/tests/health-check-tests.js",
          "testResults": [
            {
              "title": "HEALTH-V2-001: reports dependencies",
              "ancestorTitles": [],
              "status": "passed",
              "duration": 31,
              "failureMessages": []
            },
            {
              "title": "HEALTH-001: reports status",
              "ancestorTitles": [],
              "status": "passed",
              "duration": 18,
              "failureMessages": []
            }
          ]
        },
        {
          "name": "/qa/tests/cors-testing.js",
          "testResults": [
            {
              "title": "CORS-001: preflight",
              "ancestorTitles": [],
              "status": "skipped",
              "duration": null,
              "failureMessages": []
            }
          ]
        }
      ]
    }
"#};

struct Workspace {
    dir: Utf8TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: Utf8TempDir::new().expect("created temp dir"),
        }
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.dir.path().join(name)
    }

    fn write_report(&self, contents: &str) {
        std::fs::write(self.path("test-report.json"), contents).expect("wrote report");
    }

    fn config(&self) -> TrackerConfig {
        TrackerConfig {
            input: self.path("test-report.json"),
            output: self.path("test-results.md"),
            ..TrackerConfig::default()
        }
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("output exists")
    }
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
}

fn without_timestamp(markdown: &str) -> String {
    markdown
        .lines()
        .filter(|line| !line.starts_with("**Generated:**"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn all_passed_report() {
    let workspace = Workspace::new();
    workspace.write_report(ALL_PASSED);

    let outcome = ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect("pipeline succeeds");
    assert_eq!(outcome.written, [workspace.path("test-results.md")]);
    assert_eq!(outcome.summary.total, 2);
    assert!(!outcome.count_mismatch);

    let markdown = workspace.read("test-results.md");
    assert!(markdown.contains("- **Total Tests:** 2\n"), "{markdown}");
    assert!(markdown.contains("- **Passed:** 2 (100%)\n"), "{markdown}");
    assert!(
        markdown.contains(indoc! {"
            ## Authentication & Authorization Tests

            | TC-ID | Test Case | Status | Duration (ms) | Error Message |
            |-------|-----------|--------|---------------|---------------|
            | AUTH-001 | AUTH-001: accepts a valid token | ✅ PASS | 12 |  |
            | AUTH-002 | AUTH-002: rejects an expired token | ✅ PASS | 9 |  |
        "}),
        "{markdown}"
    );
    assert_eq!(markdown.matches("| ✅ PASS |\n").count(), 9);
}

#[test]
fn mixed_report() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);

    ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect("pipeline succeeds");
    let markdown = workspace.read("test-results.md");

    assert_eq!(
        without_timestamp(&markdown),
        without_timestamp(indoc! {"
            # AddVantage API Test Results

            **Generated:** 2026-10-18T09:30:00.000Z

            ## Summary

            - **Total Tests:** 5
            - **Passed:** 3 (60%)
            - **Failed:** 1
            - **Pending:** 1

            ## Health Check Tests

            | TC-ID | Test Case | Status | Duration (ms) | Error Message |
            |-------|-----------|--------|---------------|---------------|
            | HEALTH-001 | HEALTH-001: reports status | ✅ PASS | 18 |  |
            | HEALTH-V2-001 | HEALTH-V2-001: reports dependencies | ✅ PASS | 31 |  |

            ## Rate Limiting Tests

            | TC-ID | Test Case | Status | Duration (ms) | Error Message |
            |-------|-----------|--------|---------------|---------------|
            | RATE-001 | RATE-001: health checks are not limited | ✅ PASS | 220 |  |
            | RATE-002 | returns 429 after the limit | ❌ FAIL | 1503 | Expected 200 got 401 at line 5... |

            ## Other Tests

            | TC-ID | Test Case | Status | Duration (ms) | Error Message |
            |-------|-----------|--------|---------------|---------------|
            | CORS-001 | CORS-001: preflight | ⏳ PENDING |  |  |

            ## Acceptance Criteria Status

            | Criteria | Status |
            |----------|--------|
            | All endpoints require valid JWT authentication (except health checks) | ❌ FAIL |
            | STP operations validate requests and return appropriate responses | ❌ FAIL |
            | Inquiry operations validate parameters and return parsed responses | ❌ FAIL |
            | Health checks return accurate status information | ❌ FAIL |
            | Rate limiting is enforced per endpoint type | ❌ FAIL |
            | Error responses follow standard structure with appropriate HTTP status codes | ❌ FAIL |
            | Required headers (AddVantage-Authorization, uuid) are validated | ❌ FAIL |
            | Request validation errors are detailed and field-specific | ❌ FAIL |
            | All responses include correlation ID and metadata | ❌ FAIL |
        "})
    );
}

#[test]
fn per_category_criteria() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);

    let config = TrackerConfig {
        criteria_mode: CriteriaMode::PerCategory,
        ..workspace.config()
    };
    ReportPipeline::new(config)
        .run(generated_at())
        .expect("pipeline succeeds");
    let markdown = workspace.read("test-results.md");

    assert!(
        markdown.contains("| Rate limiting is enforced per endpoint type | ❌ FAIL |\n"),
        "{markdown}"
    );
    assert!(
        markdown.contains("| Health checks return accurate status information | ✅ PASS |\n"),
        "{markdown}"
    );
    assert!(
        markdown.contains("| All responses include correlation ID and metadata | ❌ FAIL |\n"),
        "{markdown}"
    );
    assert_eq!(markdown.matches("| ❌ FAIL |\n").count(), 2);
}

#[test]
fn empty_report() {
    let workspace = Workspace::new();
    workspace.write_report(
        r#"{"numFailedTests": 0, "numPassedTests": 0, "numPendingTests": 0, "testResults": []}"#,
    );

    let outcome = ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect("pipeline succeeds");
    assert_eq!(outcome.summary.pass_rate_percent(), None);

    let markdown = workspace.read("test-results.md");
    assert!(markdown.contains("- **Passed:** 0 (N/A)\n"), "{markdown}");
    assert!(!markdown.contains("NaN"), "{markdown}");
    assert!(!markdown.contains("| TC-ID |"), "{markdown}");
}

#[test]
fn rerun_is_identical_except_timestamp() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);
    let pipeline = ReportPipeline::new(workspace.config());

    pipeline.run(generated_at()).expect("first run succeeds");
    let first = workspace.read("test-results.md");
    pipeline
        .run(Utc.with_ymd_and_hms(2026, 10, 19, 17, 0, 5).unwrap())
        .expect("second run succeeds");
    let second = workspace.read("test-results.md");

    assert_ne!(first, second);
    assert_eq!(without_timestamp(&first), without_timestamp(&second));
}

#[test]
fn writes_markdown_then_json_summary() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);

    let config = TrackerConfig {
        json_summary: Some(workspace.path("reports/test-results.json")),
        ..workspace.config()
    };
    let outcome = ReportPipeline::new(config)
        .run(generated_at())
        .expect("pipeline succeeds");
    assert_eq!(
        outcome.written,
        [
            workspace.path("test-results.md"),
            workspace.path("reports/test-results.json"),
        ]
    );

    let json: serde_json::Value =
        serde_json::from_str(&workspace.read("reports/test-results.json")).expect("valid JSON");
    assert_eq!(json["summary"]["pass-rate-percent"], 60);
    assert_eq!(json["categories"][0]["category"], "Health Check");
}

#[test]
fn count_mismatch_is_flagged() {
    let workspace = Workspace::new();
    workspace.write_report(&ALL_PASSED.replace(r#""numPassedTests": 2"#, r#""numPassedTests": 3"#));

    let outcome = ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect("pipeline succeeds");
    assert!(outcome.count_mismatch);
    assert_eq!(outcome.summary.total, 3);
}

#[test]
fn missing_report_leaves_output_untouched() {
    let workspace = Workspace::new();
    std::fs::write(workspace.path("test-results.md"), "previous results").expect("seeded");

    let error = ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect_err("report is missing");
    match &error {
        PipelineError::Load(LoadReportError::NotFound { path }) => {
            assert_eq!(path, &workspace.path("test-report.json"));
        }
        other => panic!("expected missing report, got {other:?}"),
    }
    assert_eq!(workspace.read("test-results.md"), "previous results");
}

#[test]
fn malformed_report_writes_nothing() {
    let workspace = Workspace::new();
    workspace.write_report("{ not json");

    let error = ReportPipeline::new(workspace.config())
        .run(generated_at())
        .expect_err("report is malformed");
    assert!(
        matches!(error, PipelineError::Load(LoadReportError::Parse { .. })),
        "{error:?}"
    );
    assert!(!workspace.path("test-results.md").exists());
}

#[test]
fn blocked_markdown_leaves_no_json_summary() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);
    std::fs::write(workspace.path("blocker"), "").expect("seeded");

    let config = TrackerConfig {
        output: workspace.path("blocker/test-results.md"),
        json_summary: Some(workspace.path("test-results.json")),
        ..workspace.config()
    };
    let error = ReportPipeline::new(config)
        .run(generated_at())
        .expect_err("markdown output is blocked");
    assert!(
        matches!(error, PipelineError::Write(WriteReportError::CreateDir { .. })),
        "{error:?}"
    );
    assert!(!workspace.path("test-results.json").exists());
}

#[test]
fn blocked_json_summary_restores_markdown() {
    let workspace = Workspace::new();
    workspace.write_report(MIXED);
    std::fs::write(workspace.path("test-results.md"), "previous results").expect("seeded");
    std::fs::write(workspace.path("blocker"), "").expect("seeded");

    let config = TrackerConfig {
        json_summary: Some(workspace.path("blocker/test-results.json")),
        ..workspace.config()
    };
    ReportPipeline::new(config)
        .run(generated_at())
        .expect_err("JSON summary is blocked");
    assert_eq!(workspace.read("test-results.md"), "previous results");
}
