// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `results-tracker` failures.
///
/// `results-tracker` may fail for a variety of reasons. This structure documents the exit codes
/// that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum TrackerExitCode {}

impl TrackerExitCode {
    /// No errors occurred and the results markdown was written.
    pub const OK: i32 = 0;

    /// The execution report was not found. Run the tests first.
    pub const REPORT_NOT_FOUND: i32 = 101;

    /// The execution report exists but could not be read.
    pub const REPORT_READ_FAILED: i32 = 102;

    /// The execution report is not a well-formed JSON report.
    pub const REPORT_PARSE_FAILED: i32 = 103;

    /// Writing one of the output files produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up a `results-tracker` invocation, for example an
    /// unreadable or malformed config file.
    pub const SETUP_ERROR: i32 = 96;
}
