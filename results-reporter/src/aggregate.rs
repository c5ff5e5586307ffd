// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grouping of classified outcomes and computation of summary statistics.

use crate::{
    classify::{Category, ClassifiedOutcome, classify},
    criteria::{CriteriaMode, CriterionStatus, evaluate_criteria},
};
use results_metadata::{StatusCounts, TestReport};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary counts for a report, as reported by the test runner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSummary {
    /// The total number of tests: `passed + failed + pending`.
    pub total: usize,

    /// The number of passed tests.
    pub passed: usize,

    /// The number of failed tests.
    pub failed: usize,

    /// The number of pending tests.
    pub pending: usize,
}

impl ReportSummary {
    /// Creates a summary from the counts in the report.
    pub fn from_report(report: &TestReport) -> Self {
        Self {
            total: report.total(),
            passed: report.num_passed,
            failed: report.num_failed,
            pending: report.num_pending,
        }
    }

    /// Returns the percentage of passed tests, rounded half up, or `None` if there are no tests.
    pub fn pass_rate_percent(&self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        // round(100 * passed / total) == floor((200 * passed + total) / (2 * total)), in u128 so
        // that counts near usize::MAX don't overflow.
        let (passed, total) = (self.passed as u128, self.total as u128);
        let rate = (200 * passed + total) / (2 * total);
        // Only a hand-built summary with passed > total can exceed 100.
        Some(rate.min(100) as usize)
    }
}

/// The outcomes of one category, sorted by test-case ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// The category.
    pub category: Category,

    /// Outcomes sorted by test-case ID, unassigned IDs last. Outcomes with equal IDs retain their
    /// order from the report.
    pub outcomes: Vec<ClassifiedOutcome<'a>>,
}

/// The runner's counts disagree with the statuses of the outcomes in the report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CountMismatch {
    /// The counts stated at the top of the report.
    pub reported: StatusCounts,

    /// The counts of the outcomes actually present.
    pub observed: StatusCounts,
}

/// Everything needed to render a report.
#[derive(Clone, Debug)]
pub struct Aggregate<'a> {
    /// Summary counts.
    pub summary: ReportSummary,

    /// Non-empty categories, in [`Category::ALL`] order.
    pub groups: Vec<CategoryGroup<'a>>,

    /// Acceptance criteria, in report order.
    pub criteria: Vec<CriterionStatus>,

    /// Set if the report's counts don't match its outcomes.
    pub count_mismatch: Option<CountMismatch>,
}

impl Aggregate<'_> {
    /// Returns the total number of outcomes across all groups.
    pub fn outcome_count(&self) -> usize {
        self.groups.iter().map(|group| group.outcomes.len()).sum()
    }
}

/// Classifies every outcome in `report`, groups them by category and evaluates the acceptance
/// criteria.
pub fn aggregate(report: &TestReport, mode: CriteriaMode) -> Aggregate<'_> {
    let mut buckets: BTreeMap<Category, Vec<ClassifiedOutcome<'_>>> = BTreeMap::new();
    for (suite, outcome) in report.outcomes() {
        let classified = classify(outcome, &suite.source_name);
        buckets
            .entry(classified.category)
            .or_default()
            .push(classified);
    }

    let groups: Vec<_> = buckets
        .into_iter()
        .map(|(category, mut outcomes)| {
            // sort_by is stable.
            outcomes.sort_by(|a, b| a.test_case_id.cmp(&b.test_case_id));
            CategoryGroup { category, outcomes }
        })
        .collect();

    let criteria = evaluate_criteria(
        mode,
        report.num_failed,
        groups.iter().flat_map(|group| group.outcomes.iter()),
    );

    let reported = report.reported_counts();
    let observed = StatusCounts::from_report(report);
    let count_mismatch = (reported != observed).then_some(CountMismatch { reported, observed });

    Aggregate {
        summary: ReportSummary::from_report(report),
        groups,
        criteria,
        count_mismatch,
    }
}
