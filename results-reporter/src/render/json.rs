// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{RenderContext, error_excerpt};
use crate::{
    aggregate::{Aggregate, ReportSummary},
    classify::{Category, TestCaseId},
    criteria::CriterionStatus,
    errors::RenderError,
};
use results_metadata::OutcomeStatus;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonSummary<'a> {
    title: &'a str,
    generated_at: String,
    summary: JsonCounts,
    categories: Vec<JsonCategory<'a>>,
    acceptance_criteria: &'a [CriterionStatus],
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonCounts {
    #[serde(flatten)]
    counts: ReportSummary,
    pass_rate_percent: Option<usize>,
}

#[derive(Serialize)]
struct JsonCategory<'a> {
    category: Category,
    tests: Vec<JsonTest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonTest<'a> {
    test_case_id: &'a TestCaseId,
    title: &'a str,
    status: OutcomeStatus,
    duration_ms: Option<u64>,
    error_message: Option<String>,
}

/// Renders the machine-readable JSON summary.
///
/// The document carries the same information as the markdown report, pretty-printed.
pub fn render_json(context: &RenderContext, aggregate: &Aggregate<'_>) -> Result<String, RenderError> {
    let categories = aggregate
        .groups
        .iter()
        .map(|group| JsonCategory {
            category: group.category,
            tests: group
                .outcomes
                .iter()
                .map(|classified| JsonTest {
                    test_case_id: &classified.test_case_id,
                    title: &classified.outcome.title,
                    status: classified.outcome.status,
                    duration_ms: classified.outcome.duration_ms,
                    error_message: error_excerpt(classified.outcome),
                })
                .collect(),
        })
        .collect();

    let document = JsonSummary {
        title: &context.title,
        generated_at: context.timestamp(),
        summary: JsonCounts {
            counts: aggregate.summary,
            pass_rate_percent: aggregate.summary.pass_rate_percent(),
        },
        categories,
        acceptance_criteria: &aggregate.criteria,
    };

    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(rendered)
}
