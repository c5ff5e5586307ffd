// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by results-reporter.

use camino::Utf8PathBuf;
use thiserror::Error;

/// The command that produces the execution report. Shown to operators when the report is missing.
pub const GENERATE_REPORT_HINT: &str = "npm run test:report";

/// An error that occurred while loading the JSON execution report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadReportError {
    /// The report file does not exist.
    #[error("test report not found at `{path}` (run the tests first with `{}`)", GENERATE_REPORT_HINT)]
    NotFound {
        /// The path at which the report was expected.
        path: Utf8PathBuf,
    },

    /// The report file exists but could not be read.
    #[error("error reading test report at `{path}`")]
    Read {
        /// The path to the report.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The report file is not a well-formed execution report.
    #[error("error parsing test report at `{path}`")]
    Parse {
        /// The path to the report.
        path: Utf8PathBuf,

        /// The underlying error, along with the location within the JSON document.
        #[source]
        error: serde_path_to_error::Error<serde_json::Error>,
    },
}

impl LoadReportError {
    /// Returns the path to the report this error is about.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// An error that occurred while persisting a rendered report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// The directory that should contain the output could not be created.
    #[error("error creating output directory `{path}`")]
    CreateDir {
        /// The directory being created.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The output file could not be written.
    #[error("error writing output to `{path}`")]
    Write {
        /// The output file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: atomicwrites::Error<std::io::Error>,
    },
}

impl WriteReportError {
    /// Returns the path this error is about.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// An error that occurred while rendering the JSON summary.
#[derive(Debug, Error)]
#[error("error serializing JSON summary")]
pub struct RenderError {
    #[from]
    inner: serde_json::Error,
}

/// An error that occurred while loading the results-tracker config file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A config file was explicitly requested but does not exist.
    #[error("config file `{path}` not found")]
    NotFound {
        /// The requested path.
        path: Utf8PathBuf,
    },

    /// The config file could not be read.
    #[error("error reading config file `{path}`")]
    Read {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The config file is not valid TOML, or has values of the wrong type.
    #[error("failed to parse config file `{path}`")]
    Parse {
        /// The path to the config file.
        path: Utf8PathBuf,

        /// The underlying TOML error.
        #[source]
        error: toml::de::Error,
    },
}

/// An error that aborted a [`ReportPipeline`](crate::pipeline::ReportPipeline) run.
///
/// Nothing is written to the output paths when loading or rendering fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// Loading the execution report failed.
    #[error("failed to load test report")]
    Load(#[from] LoadReportError),

    /// Rendering the JSON summary failed.
    #[error("failed to render results")]
    Render(#[from] RenderError),

    /// Writing an output file failed.
    #[error("failed to write results")]
    Write(#[from] WriteReportError),
}
