// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading the JSON execution report written by the test runner.

use crate::errors::LoadReportError;
use camino::Utf8Path;
use results_metadata::TestReport;
use tracing::debug;

/// Reads and parses the execution report at `path`.
pub fn load_report(path: &Utf8Path) -> Result<TestReport, LoadReportError> {
    debug!("loading test report from {path}");
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadReportError::NotFound {
                path: path.to_owned(),
            });
        }
        Err(error) => {
            return Err(LoadReportError::Read {
                path: path.to_owned(),
                error,
            });
        }
    };

    let deserializer = &mut serde_json::Deserializer::from_str(&contents);
    let report: TestReport =
        serde_path_to_error::deserialize(deserializer).map_err(|error| LoadReportError::Parse {
            path: path.to_owned(),
            error,
        })?;

    debug!(
        "loaded {} suites ({})",
        report.suites.len(),
        report.reported_counts(),
    );
    Ok(report)
}
