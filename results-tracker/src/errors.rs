// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use results_metadata::TrackerExitCode;
use results_reporter::errors::{
    ConfigError, GENERATE_REPORT_HINT, LoadReportError, PipelineError,
};
use std::error::Error;
use thiserror::Error;
use tracing::{error, info};

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure of a `results-tracker` invocation.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config error")]
    ConfigError {
        #[from]
        err: ConfigError,
    },
    #[error("report pipeline failed")]
    PipelineError {
        #[from]
        err: PipelineError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigError { .. } => TrackerExitCode::SETUP_ERROR,
            Self::PipelineError { err } => match err {
                PipelineError::Load(LoadReportError::NotFound { .. }) => {
                    TrackerExitCode::REPORT_NOT_FOUND
                }
                PipelineError::Load(LoadReportError::Parse { .. }) => {
                    TrackerExitCode::REPORT_PARSE_FAILED
                }
                PipelineError::Load(_) => TrackerExitCode::REPORT_READ_FAILED,
                PipelineError::Render(_) | PipelineError::Write(_) => {
                    TrackerExitCode::WRITE_OUTPUT_ERROR
                }
                _ => TrackerExitCode::SETUP_ERROR,
            },
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::ConfigError { err } => {
                error!("{err}");
                err.source()
            }
            Self::PipelineError { err } => match err {
                PipelineError::Load(LoadReportError::NotFound { path }) => {
                    error!("test report not found at {}", path.style(styles.bold));
                    info!(
                        "run the tests first with: {}",
                        GENERATE_REPORT_HINT.style(styles.hint)
                    );
                    None
                }
                PipelineError::Load(err) => {
                    let action = match err {
                        LoadReportError::Parse { .. } => "parse",
                        _ => "read",
                    };
                    error!(
                        "failed to {action} test report at {}",
                        err.path().style(styles.bold)
                    );
                    err.source()
                }
                PipelineError::Render(err) => {
                    error!("failed to render JSON summary");
                    Some(err as &dyn Error)
                }
                PipelineError::Write(err) => {
                    error!(
                        "failed to write results to {}",
                        err.path().style(styles.bold)
                    );
                    err.source()
                }
                other => {
                    error!("{other}");
                    other.source()
                }
            },
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
