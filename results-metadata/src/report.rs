// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The root of a JSON execution report.
///
/// The `num_*` counts are produced by the test runner. They are expected to match the statuses of
/// the outcomes in [`suites`](Self::suites), but this isn't enforced; see
/// [`StatusCounts::from_report`] to recompute them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// The number of tests that passed.
    #[serde(rename = "numPassedTests")]
    pub num_passed: usize,

    /// The number of tests that failed.
    #[serde(rename = "numFailedTests")]
    pub num_failed: usize,

    /// The number of tests that were pending (skipped, todo or disabled).
    #[serde(rename = "numPendingTests")]
    pub num_pending: usize,

    /// One entry per test source file, in the order the runner reported them.
    #[serde(rename = "testResults")]
    pub suites: Vec<TestSuiteResult>,
}

impl TestReport {
    /// Returns the total number of tests, as reported by the runner.
    ///
    /// Saturates at `usize::MAX` if the reported counts are absurdly large.
    pub fn total(&self) -> usize {
        self.reported_counts().total()
    }

    /// Returns the counts as reported by the runner.
    pub fn reported_counts(&self) -> StatusCounts {
        StatusCounts {
            passed: self.num_passed,
            failed: self.num_failed,
            pending: self.num_pending,
        }
    }

    /// Iterates over every outcome in the report along with the suite it belongs to.
    pub fn outcomes(&self) -> impl Iterator<Item = (&TestSuiteResult, &TestOutcome)> + '_ {
        self.suites
            .iter()
            .flat_map(|suite| suite.outcomes.iter().map(move |outcome| (suite, outcome)))
    }
}

/// The outcomes produced by a single test source file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TestSuiteResult {
    /// The name of the source file, typically an absolute path such as
    /// `/work/tests/authentication-tests.js`.
    #[serde(rename = "name")]
    pub source_name: String,

    /// The individual test outcomes.
    #[serde(rename = "testResults", default)]
    pub outcomes: Vec<TestOutcome>,
}

/// A single executed test case.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    /// The title passed to `it` or `test`.
    pub title: String,

    /// Titles of the enclosing `describe` blocks, outermost first.
    #[serde(default)]
    pub ancestor_titles: Vec<String>,

    /// The status of this test.
    pub status: OutcomeStatus,

    /// The time taken by this test in milliseconds. Absent for tests that didn't run.
    #[serde(rename = "duration", default)]
    pub duration_ms: Option<u64>,

    /// Failure messages, one per failed assertion. Empty unless the test failed.
    #[serde(default)]
    pub failure_messages: Vec<String>,
}

impl TestOutcome {
    /// Returns the first failure message, if any.
    pub fn first_failure_message(&self) -> Option<&str> {
        self.failure_messages.first().map(String::as_str)
    }
}

/// The status of a [`TestOutcome`].
///
/// Jest reports `skipped`, `todo` and `disabled` as separate statuses; they're all treated as
/// pending here.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "proptest1", derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test didn't run.
    #[serde(alias = "skipped", alias = "todo", alias = "disabled")]
    Pending,
}

impl OutcomeStatus {
    /// Returns the string used for this status in the JSON report.
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Passed => "passed",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::Pending => "pending",
        }
    }

    /// Returns true if this status represents a failure.
    pub fn is_failure(self) -> bool {
        matches!(self, OutcomeStatus::Failed)
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Passed, failed and pending counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// The number of passed tests.
    pub passed: usize,

    /// The number of failed tests.
    pub failed: usize,

    /// The number of pending tests.
    pub pending: usize,
}

impl StatusCounts {
    /// Counts the statuses of every outcome in the report.
    pub fn from_report(report: &TestReport) -> Self {
        let mut counts = Self::default();
        for (_, outcome) in report.outcomes() {
            counts.add(outcome.status);
        }
        counts
    }

    /// Adds a single status to the counts.
    pub fn add(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Passed => self.passed += 1,
            OutcomeStatus::Failed => self.failed += 1,
            OutcomeStatus::Pending => self.pending += 1,
        }
    }

    /// Returns the sum of all counts, saturating at `usize::MAX`.
    pub fn total(&self) -> usize {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.pending)
    }
}

impl fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} pending",
            self.passed, self.failed, self.pending
        )
    }
}
