// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the JSON execution reports consumed by `results-tracker`.
//!
//! The report format is the one written by Jest's `--json --outputFile` option. Only the fields
//! `results-tracker` needs are modeled; everything else in the file is ignored.
//!
//! Documented process exit codes for `results-tracker` live in [`TrackerExitCode`].

mod exit_codes;
mod report;

pub use exit_codes::*;
pub use report::*;
