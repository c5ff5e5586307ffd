// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core logic for results-tracker.
//!
//! results-tracker turns the JSON execution report written by Jest into a markdown results
//! document grouped by test category, with summary counts and acceptance-criteria status. The
//! stages are available individually ([`load`], [`classify`], [`aggregate`], [`render`],
//! [`write`]) and together through [`pipeline::ReportPipeline`].

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod load;
pub mod pipeline;
pub mod render;
pub mod write;
