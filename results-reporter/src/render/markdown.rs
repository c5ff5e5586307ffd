// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{RenderContext, criterion_label, error_excerpt, escape_cell, status_label};
use crate::{aggregate::Aggregate, classify::ClassifiedOutcome};
use swrite::{SWrite, swrite};

/// Renders the markdown results document.
pub fn render_markdown(context: &RenderContext, aggregate: &Aggregate<'_>) -> String {
    let mut out = String::with_capacity(1024 + 128 * aggregate.outcome_count());
    let summary = &aggregate.summary;

    swrite!(out, "# {}\n\n", context.title);
    swrite!(out, "**Generated:** {}\n\n", context.timestamp());

    out.push_str("## Summary\n\n");
    swrite!(out, "- **Total Tests:** {}\n", summary.total);
    match summary.pass_rate_percent() {
        Some(rate) => swrite!(out, "- **Passed:** {} ({rate}%)\n", summary.passed),
        None => swrite!(out, "- **Passed:** {} (N/A)\n", summary.passed),
    }
    swrite!(out, "- **Failed:** {}\n", summary.failed);
    swrite!(out, "- **Pending:** {}\n\n", summary.pending);

    for group in &aggregate.groups {
        swrite!(out, "## {} Tests\n\n", group.category.label());
        out.push_str("| TC-ID | Test Case | Status | Duration (ms) | Error Message |\n");
        out.push_str("|-------|-----------|--------|---------------|---------------|\n");
        for classified in &group.outcomes {
            write_outcome_row(&mut out, classified);
        }
        out.push('\n');
    }

    out.push_str("## Acceptance Criteria Status\n\n");
    out.push_str("| Criteria | Status |\n");
    out.push_str("|----------|--------|\n");
    for status in &aggregate.criteria {
        swrite!(
            out,
            "| {} | {} |\n",
            status.criterion,
            criterion_label(status.passed)
        );
    }

    out
}

fn write_outcome_row(out: &mut String, classified: &ClassifiedOutcome<'_>) {
    let outcome = classified.outcome;
    swrite!(
        out,
        "| {} | {} | {} | ",
        classified.test_case_id,
        escape_cell(&outcome.title),
        status_label(outcome.status),
    );
    if let Some(duration) = outcome.duration_ms {
        swrite!(out, "{duration}");
    }
    out.push_str(" | ");
    if let Some(excerpt) = error_excerpt(outcome) {
        out.push_str(&escape_cell(&excerpt));
    }
    out.push_str(" |\n");
}
