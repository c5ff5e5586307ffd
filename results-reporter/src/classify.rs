// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of test outcomes into test-case IDs and categories.
//!
//! Test-case IDs such as `AUTH-001` tie an outcome back to the test plan. They're extracted from
//! the test title, falling back to the titles of enclosing `describe` blocks. Categories are
//! derived from the name of the source file the outcome came from.

use regex::Regex;
use results_metadata::TestOutcome;
use serde::Serialize;
use std::{cmp::Ordering, fmt, sync::LazyLock};

/// The functional area a test-case ID belongs to, identified by its prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdArea {
    /// `AUTH-###`: authentication and authorization.
    Auth,
    /// `STP-###`: straight-through processing operations.
    Stp,
    /// `BATCH-###`: batch STP operations.
    Batch,
    /// `INQ-###`: inquiry operations.
    Inquiry,
    /// `HEALTH-V2-###`: v2 health checks.
    HealthV2,
    /// `HEALTH-###`: health checks.
    Health,
    /// `READY-###`: readiness probes.
    Readiness,
    /// `RATE-###`: rate limiting.
    RateLimit,
    /// `HEADER-###`: request and response headers.
    Header,
    /// `ERR-###`: error handling.
    Error,
    /// `VAL-###`: data validation.
    Validation,
    /// `CORS-###`: cross-origin resource sharing.
    Cors,
    /// `INT-###`: integration flows.
    Integration,
}

impl IdArea {
    /// All areas, in the order their patterns are tried.
    ///
    /// `HealthV2` must come before `Health`.
    pub const ALL: [IdArea; 13] = [
        IdArea::Auth,
        IdArea::Stp,
        IdArea::Batch,
        IdArea::Inquiry,
        IdArea::HealthV2,
        IdArea::Health,
        IdArea::Readiness,
        IdArea::RateLimit,
        IdArea::Header,
        IdArea::Error,
        IdArea::Validation,
        IdArea::Cors,
        IdArea::Integration,
    ];

    /// Returns the prefix that introduces IDs in this area, including the trailing dash.
    pub fn prefix(self) -> &'static str {
        match self {
            IdArea::Auth => "AUTH-",
            IdArea::Stp => "STP-",
            IdArea::Batch => "BATCH-",
            IdArea::Inquiry => "INQ-",
            IdArea::HealthV2 => "HEALTH-V2-",
            IdArea::Health => "HEALTH-",
            IdArea::Readiness => "READY-",
            IdArea::RateLimit => "RATE-",
            IdArea::Header => "HEADER-",
            IdArea::Error => "ERR-",
            IdArea::Validation => "VAL-",
            IdArea::Cors => "CORS-",
            IdArea::Integration => "INT-",
        }
    }

    fn pattern(self) -> String {
        format!(r"{}\d{{3}}", regex::escape(self.prefix()))
    }
}

static ID_PATTERNS: LazyLock<Vec<(IdArea, Regex)>> = LazyLock::new(|| {
    IdArea::ALL
        .iter()
        .map(|&area| {
            let regex = Regex::new(&area.pattern()).expect("test case ID patterns are valid");
            (area, regex)
        })
        .collect()
});

/// A test-case identifier extracted from a test or group title.
///
/// Orders by the identifier text, with [`TestCaseId::Unassigned`] sorting after every
/// assigned ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestCaseId {
    /// An identifier matched one of the known patterns.
    Assigned {
        /// The area the identifier belongs to.
        area: IdArea,

        /// The matched text, e.g. `AUTH-001`.
        id: String,
    },

    /// No known pattern matched. Displayed as `N/A`.
    Unassigned,
}

impl TestCaseId {
    /// The text used for outcomes without an identifier.
    pub const UNASSIGNED_STR: &'static str = "N/A";

    /// Extracts an identifier from the first string in `titles` that contains one.
    ///
    /// Within a single title, patterns are tried in [`IdArea::ALL`] order and the first pattern
    /// that matches anywhere in the title wins.
    pub fn extract<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        for title in titles {
            for (area, regex) in ID_PATTERNS.iter() {
                if let Some(m) = regex.find(title) {
                    return TestCaseId::Assigned {
                        area: *area,
                        id: m.as_str().to_owned(),
                    };
                }
            }
        }
        TestCaseId::Unassigned
    }

    /// Returns the identifier text, or `N/A`.
    pub fn as_str(&self) -> &str {
        match self {
            TestCaseId::Assigned { id, .. } => id,
            TestCaseId::Unassigned => Self::UNASSIGNED_STR,
        }
    }

    /// Returns the area of this identifier, if one was assigned.
    pub fn area(&self) -> Option<IdArea> {
        match self {
            TestCaseId::Assigned { area, .. } => Some(*area),
            TestCaseId::Unassigned => None,
        }
    }

    /// Returns true if no identifier was found.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, TestCaseId::Unassigned)
    }
}

impl Ord for TestCaseId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                TestCaseId::Assigned { area, id },
                TestCaseId::Assigned {
                    area: other_area,
                    id: other_id,
                },
            ) => id.cmp(other_id).then_with(|| area.cmp(other_area)),
            (TestCaseId::Assigned { .. }, TestCaseId::Unassigned) => Ordering::Less,
            (TestCaseId::Unassigned, TestCaseId::Assigned { .. }) => Ordering::Greater,
            (TestCaseId::Unassigned, TestCaseId::Unassigned) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TestCaseId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestCaseId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A functional test area used to group outcomes in the report.
///
/// The set is closed: suites that don't match any known source file land in
/// [`Category::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Authentication & Authorization.
    Authentication,
    /// STP Operations.
    StpOperations,
    /// Inquiry Operations.
    InquiryOperations,
    /// Health Check.
    HealthCheck,
    /// Rate Limiting.
    RateLimiting,
    /// Error Handling.
    ErrorHandling,
    /// Data Validation.
    DataValidation,
    /// Request/Response Headers.
    Headers,
    /// Everything else.
    Other,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 9] = [
        Category::Authentication,
        Category::StpOperations,
        Category::InquiryOperations,
        Category::HealthCheck,
        Category::RateLimiting,
        Category::ErrorHandling,
        Category::DataValidation,
        Category::Headers,
        Category::Other,
    ];

    /// Returns the human-readable label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Authentication => "Authentication & Authorization",
            Category::StpOperations => "STP Operations",
            Category::InquiryOperations => "Inquiry Operations",
            Category::HealthCheck => "Health Check",
            Category::RateLimiting => "Rate Limiting",
            Category::ErrorHandling => "Error Handling",
            Category::DataValidation => "Data Validation",
            Category::Headers => "Request/Response Headers",
            Category::Other => "Other",
        }
    }

    /// Returns the substring that identifies this category's source file, if any.
    pub fn suite_marker(self) -> Option<&'static str> {
        match self {
            Category::Authentication => Some("authentication-tests"),
            Category::StpOperations => Some("stp-operations-tests"),
            Category::InquiryOperations => Some("inquiry-operations-tests"),
            Category::HealthCheck => Some("health-check-tests"),
            Category::RateLimiting => Some("rate-limiting-tests"),
            Category::ErrorHandling => Some("error-handling-tests"),
            Category::DataValidation => Some("data-validation-tests"),
            Category::Headers => Some("headers-tests"),
            Category::Other => None,
        }
    }

    /// Determines the category of a suite from its source name.
    ///
    /// Matching is case-sensitive substring containment, in [`Category::ALL`] order.
    pub fn from_suite_name(source_name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .suite_marker()
                    .is_some_and(|marker| source_name.contains(marker))
            })
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A [`TestOutcome`] annotated with its test-case ID and category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedOutcome<'a> {
    /// The underlying outcome.
    pub outcome: &'a TestOutcome,

    /// The extracted test-case ID.
    pub test_case_id: TestCaseId,

    /// The category of the suite the outcome came from.
    pub category: Category,
}

/// Classifies a single outcome from the suite named `suite_source_name`.
///
/// The outcome's own title is searched for an ID before its ancestor titles, which are searched
/// outermost first.
pub fn classify<'a>(outcome: &'a TestOutcome, suite_source_name: &str) -> ClassifiedOutcome<'a> {
    let titles = std::iter::once(outcome.title.as_str())
        .chain(outcome.ancestor_titles.iter().map(String::as_str));
    ClassifiedOutcome {
        outcome,
        test_case_id: TestCaseId::extract(titles),
        category: Category::from_suite_name(suite_source_name),
    }
}
