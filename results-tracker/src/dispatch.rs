// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    output::{OutputContext, OutputOpts, help_styles},
};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Args, Parser, ValueEnum};
use results_metadata::TrackerExitCode;
use results_reporter::{
    config::{ConfigLocation, ConfigOverrides, TrackerConfig},
    criteria::CriteriaMode,
    pipeline::ReportPipeline,
};
use tracing::debug;

/// Generate a markdown summary of AddVantage API test results.
///
/// Reads the JSON execution report written by `npm run test:report` and writes the results grouped
/// by test category, along with acceptance-criteria status.
#[derive(Debug, Parser)]
#[command(version, styles = help_styles())]
pub struct ResultsTrackerApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    #[clap(flatten)]
    report_opts: ReportOpts,
}

impl ResultsTrackerApp {
    /// Initializes logging and returns the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        let config = self.config_opts.make_config(self.report_opts.into_overrides())?;
        debug!("resolved config: {config:?}");

        ReportPipeline::new(config).run(Utc::now())?;
        Ok(TrackerExitCode::OK)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
struct ConfigOpts {
    /// Config file [default: results-tracker.toml in the current directory, "none" to skip]
    #[arg(long, value_name = "PATH", env = "RESULTS_TRACKER_CONFIG")]
    config_file: Option<String>,
}

impl ConfigOpts {
    fn make_config(&self, overrides: ConfigOverrides) -> Result<TrackerConfig, ExpectedError> {
        let location = ConfigLocation::from_cli_or_env(self.config_file.as_deref());
        let mut config = TrackerConfig::from_location(location)?;
        config.apply_overrides(overrides);
        Ok(config)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Report options")]
struct ReportOpts {
    /// Path to the JSON execution report [default: test-report.json]
    #[arg(long, value_name = "PATH", env = "RESULTS_TRACKER_INPUT")]
    input: Option<Utf8PathBuf>,

    /// Path to write the markdown results to [default: test-results.md]
    #[arg(long, short, value_name = "PATH", env = "RESULTS_TRACKER_OUTPUT")]
    output: Option<Utf8PathBuf>,

    /// Also write a JSON summary to this path
    #[arg(long, value_name = "PATH", env = "RESULTS_TRACKER_JSON_SUMMARY")]
    json_summary: Option<Utf8PathBuf>,

    /// Title of the results document
    #[arg(long)]
    title: Option<String>,

    /// How acceptance criteria are decided [default: global]
    #[arg(long, value_enum, env = "RESULTS_TRACKER_CRITERIA_MODE")]
    criteria_mode: Option<CriteriaModeOpt>,
}

impl ReportOpts {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input,
            output: self.output,
            json_summary: self.json_summary,
            title: self.title,
            criteria_mode: self.criteria_mode.map(Into::into),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CriteriaModeOpt {
    /// Every criterion fails if any test failed
    Global,
    /// Each criterion reflects the tests in its own category
    PerCategory,
}

impl From<CriteriaModeOpt> for CriteriaMode {
    fn from(opt: CriteriaModeOpt) -> Self {
        match opt {
            CriteriaModeOpt::Global => CriteriaMode::Global,
            CriteriaModeOpt::PerCategory => CriteriaMode::PerCategory,
        }
    }
}
