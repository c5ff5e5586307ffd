// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for results-tracker.
//!
//! Reads the JSON execution report written by Jest (`npm run test:report`) and writes a markdown
//! summary of the results, grouped by test category. See `results-tracker --help` for options.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{Color, OutputContext, StderrStyles};
