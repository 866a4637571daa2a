//! A named, ordered collection of cases plus the configuration they run under.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::error::{DomainError, DomainResult};
use crate::testing::TestCase;

/// A test suite as declared in a suite file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name.
    pub name: String,
    /// Harness configuration.
    pub config: HarnessConfig,
    /// Cases in declaration order.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>, config: HarnessConfig) -> Self {
        Self {
            name: name.into(),
            config,
            cases: Vec::new(),
        }
    }

    /// Add a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Get the number of cases.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if the suite is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Startup validation: everything that would make the run meaningless
    /// is rejected before any case executes.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: invalid configuration, no cases,
    /// duplicate case names, or a case violating its own invariants.
    pub fn validate(&self) -> DomainResult<()> {
        self.config.validate()?;
        if self.cases.is_empty() {
            return Err(DomainError::EmptySuite(self.name.clone()));
        }

        let mut seen = HashSet::with_capacity(self.cases.len());
        for case in &self.cases {
            case.validate()?;
            if !seen.insert(case.name.as_str()) {
                return Err(DomainError::DuplicateCase(case.name.clone()));
            }
        }
        Ok(())
    }
}
