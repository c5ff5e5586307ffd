// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of aggregated results.
//!
//! Renderers are pure: given the same [`RenderContext`] and [`Aggregate`](crate::aggregate::Aggregate)
//! they produce byte-identical output.

mod json;
mod markdown;

pub use json::render_json;
pub use markdown::render_markdown;

use chrono::{DateTime, SecondsFormat, Utc};
use results_metadata::{OutcomeStatus, TestOutcome};
use std::borrow::Cow;

/// The default report title.
pub const DEFAULT_TITLE: &str = "AddVantage API Test Results";

/// The maximum number of characters of a failure message shown in the report.
pub const ERROR_EXCERPT_LEN: usize = 100;

/// Inputs to rendering that don't come from the execution report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderContext {
    /// The report title.
    pub title: String,

    /// The time at which the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl RenderContext {
    /// Creates a new context with the given title and generation time.
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
        }
    }

    /// Returns the generation time in ISO-8601 form with millisecond precision, e.g.
    /// `2026-10-18T09:30:00.000Z`.
    pub fn timestamp(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Returns the glyph and word shown for a test status.
pub fn status_label(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Passed => "✅ PASS",
        OutcomeStatus::Failed => "❌ FAIL",
        OutcomeStatus::Pending => "⏳ PENDING",
    }
}

/// Returns the glyph and word shown for an acceptance criterion.
pub fn criterion_label(passed: bool) -> &'static str {
    if passed { "✅ PASS" } else { "❌ FAIL" }
}

/// Returns the excerpt of the first failure message shown for a failed test.
///
/// Terminal escape sequences are stripped and newlines collapsed to spaces; the result is cut to
/// [`ERROR_EXCERPT_LEN`] characters and always followed by `...`. Returns `None` for tests that
/// didn't fail, or that failed without a message.
pub fn error_excerpt(outcome: &TestOutcome) -> Option<String> {
    if !outcome.status.is_failure() {
        return None;
    }
    let message = outcome.first_failure_message()?;
    let stripped = strip_ansi_escapes::strip_str(message);
    let excerpt: String = stripped
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(ERROR_EXCERPT_LEN)
        .collect();
    Some(format!("{excerpt}..."))
}

/// Escapes text for use inside a markdown table cell.
pub(crate) fn escape_cell(text: &str) -> Cow<'_, str> {
    if !text.contains(['|', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '|' => escaped.push_str("\\|"),
            '\n' | '\r' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
