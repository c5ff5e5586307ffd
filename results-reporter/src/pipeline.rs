// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The end-to-end report pipeline: load, aggregate, render and write.

use crate::{
    aggregate::{ReportSummary, aggregate},
    config::TrackerConfig,
    errors::PipelineError,
    load::load_report,
    render::{RenderContext, render_json, render_markdown},
    write::OutputBatch,
};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Runs the report pipeline once for a given configuration.
#[derive(Clone, Debug)]
pub struct ReportPipeline {
    config: TrackerConfig,
}

impl ReportPipeline {
    /// Creates a new pipeline.
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Loads the execution report, renders it and writes the results.
    ///
    /// Every output is rendered before anything is written, so a load or render failure leaves
    /// existing outputs untouched. The markdown document is written first, then the JSON summary if
    /// one is configured. If either write fails, both outputs are left as they were before the
    /// run.
    pub fn run(&self, generated_at: DateTime<Utc>) -> Result<PipelineOutcome, PipelineError> {
        let config = &self.config;
        let report = load_report(&config.input)?;

        let aggregate = aggregate(&report, config.criteria_mode);
        if let Some(mismatch) = &aggregate.count_mismatch {
            warn!(
                "test report at {} states {} but contains {}; \
                 the stated counts are used for the summary",
                config.input, mismatch.reported, mismatch.observed,
            );
        }
        debug!(
            "classified {} outcomes into {} categories (criteria mode: {})",
            aggregate.outcome_count(),
            aggregate.groups.len(),
            config.criteria_mode,
        );

        let context = RenderContext::new(config.title.clone(), generated_at);
        let markdown = render_markdown(&context, &aggregate);
        let json = config
            .json_summary
            .as_ref()
            .map(|path| render_json(&context, &aggregate).map(|json| (path, json)))
            .transpose()?;

        let mut batch = OutputBatch::new();
        batch.add(&config.output, &markdown);
        if let Some((path, json)) = &json {
            batch.add(path, json);
        }
        let written = batch.write()?;

        info!("test results markdown generated at {}", config.output);
        if let Some((path, _)) = &json {
            info!("JSON summary generated at {path}");
        }

        Ok(PipelineOutcome {
            summary: aggregate.summary,
            written,
            count_mismatch: aggregate.count_mismatch.is_some(),
        })
    }
}

/// The result of a successful [`ReportPipeline::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// The summary counts of the report.
    pub summary: ReportSummary,

    /// The files written, in the order they were written.
    pub written: Vec<Utf8PathBuf>,

    /// Whether the report's stated counts disagreed with its outcomes.
    pub count_mismatch: bool,
}
