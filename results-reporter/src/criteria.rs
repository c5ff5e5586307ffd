// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Acceptance criteria for the AddVantage API release.

use crate::classify::{Category, ClassifiedOutcome};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// A named, coarse-grained pass/fail judgment shown at the end of the report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AcceptanceCriterion {
    /// JWT authentication is required everywhere except health checks.
    JwtAuthentication,
    /// STP requests are validated.
    StpValidation,
    /// Inquiry parameters are validated and responses parsed.
    InquiryValidation,
    /// Health checks report accurate status.
    HealthStatus,
    /// Rate limits are enforced per endpoint type.
    RateLimiting,
    /// Error responses share a standard envelope.
    ErrorStructure,
    /// Required headers are validated.
    RequiredHeaders,
    /// Validation errors are detailed and field-specific.
    FieldValidation,
    /// Every response carries a correlation ID and metadata.
    CorrelationMetadata,
}

impl AcceptanceCriterion {
    /// All criteria, in report order.
    pub const ALL: [AcceptanceCriterion; 9] = [
        AcceptanceCriterion::JwtAuthentication,
        AcceptanceCriterion::StpValidation,
        AcceptanceCriterion::InquiryValidation,
        AcceptanceCriterion::HealthStatus,
        AcceptanceCriterion::RateLimiting,
        AcceptanceCriterion::ErrorStructure,
        AcceptanceCriterion::RequiredHeaders,
        AcceptanceCriterion::FieldValidation,
        AcceptanceCriterion::CorrelationMetadata,
    ];

    /// Returns the text shown for this criterion.
    pub fn description(self) -> &'static str {
        match self {
            AcceptanceCriterion::JwtAuthentication => {
                "All endpoints require valid JWT authentication (except health checks)"
            }
            AcceptanceCriterion::StpValidation => {
                "STP operations validate requests and return appropriate responses"
            }
            AcceptanceCriterion::InquiryValidation => {
                "Inquiry operations validate parameters and return parsed responses"
            }
            AcceptanceCriterion::HealthStatus => "Health checks return accurate status information",
            AcceptanceCriterion::RateLimiting => "Rate limiting is enforced per endpoint type",
            AcceptanceCriterion::ErrorStructure => {
                "Error responses follow standard structure with appropriate HTTP status codes"
            }
            AcceptanceCriterion::RequiredHeaders => {
                "Required headers (AddVantage-Authorization, uuid) are validated"
            }
            AcceptanceCriterion::FieldValidation => {
                "Request validation errors are detailed and field-specific"
            }
            AcceptanceCriterion::CorrelationMetadata => {
                "All responses include correlation ID and metadata"
            }
        }
    }

    /// Returns the category whose outcomes decide this criterion in
    /// [`CriteriaMode::PerCategory`], or `None` if it depends on the whole report.
    pub fn category(self) -> Option<Category> {
        match self {
            AcceptanceCriterion::JwtAuthentication => Some(Category::Authentication),
            AcceptanceCriterion::StpValidation => Some(Category::StpOperations),
            AcceptanceCriterion::InquiryValidation => Some(Category::InquiryOperations),
            AcceptanceCriterion::HealthStatus => Some(Category::HealthCheck),
            AcceptanceCriterion::RateLimiting => Some(Category::RateLimiting),
            AcceptanceCriterion::ErrorStructure => Some(Category::ErrorHandling),
            AcceptanceCriterion::RequiredHeaders => Some(Category::Headers),
            AcceptanceCriterion::FieldValidation => Some(Category::DataValidation),
            AcceptanceCriterion::CorrelationMetadata => None,
        }
    }
}

impl fmt::Display for AcceptanceCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for AcceptanceCriterion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description())
    }
}

/// How acceptance criteria are decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriteriaMode {
    /// Every criterion passes iff the report has no failed tests.
    ///
    /// A single failure anywhere fails every criterion.
    #[default]
    Global,

    /// Each criterion passes iff no test in its own category failed.
    PerCategory,
}

impl CriteriaMode {
    /// Returns the config and command-line spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            CriteriaMode::Global => "global",
            CriteriaMode::PerCategory => "per-category",
        }
    }
}

impl fmt::Display for CriteriaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The evaluated status of an [`AcceptanceCriterion`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CriterionStatus {
    /// The criterion.
    pub criterion: AcceptanceCriterion,

    /// Whether it passed.
    pub passed: bool,
}

/// Evaluates every criterion, in [`AcceptanceCriterion::ALL`] order.
///
/// `num_failed` is the failure count reported by the test runner. It alone decides every
/// criterion in [`CriteriaMode::Global`], and the cross-cutting criteria in
/// [`CriteriaMode::PerCategory`].
pub fn evaluate_criteria<'a>(
    mode: CriteriaMode,
    num_failed: usize,
    outcomes: impl IntoIterator<Item = &'a ClassifiedOutcome<'a>>,
) -> Vec<CriterionStatus> {
    let failing_categories: BTreeSet<Category> = match mode {
        CriteriaMode::Global => BTreeSet::new(),
        CriteriaMode::PerCategory => outcomes
            .into_iter()
            .filter(|classified| classified.outcome.status.is_failure())
            .map(|classified| classified.category)
            .collect(),
    };

    AcceptanceCriterion::ALL
        .into_iter()
        .map(|criterion| {
            let passed = match (mode, criterion.category()) {
                (CriteriaMode::Global, _) | (CriteriaMode::PerCategory, None) => num_failed == 0,
                (CriteriaMode::PerCategory, Some(category)) => {
                    !failing_categories.contains(&category)
                }
            };
            CriterionStatus { criterion, passed }
        })
        .collect()
}
