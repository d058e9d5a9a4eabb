//! Error taxonomy for test execution

use thiserror::Error;

/// Outcome of a single test body or lifecycle hook.
pub type TestResult = Result<(), TestError>;

/// Failure raised inside a test body or an each-hook.
///
/// The engine matches on the variant to decide how to report a failed
/// test: an [`Assertion`](TestError::Assertion) is an expected mismatch
/// and prints as the bare formatted operands, while an
/// [`Unexpected`](TestError::Unexpected) error is surfaced with an
/// `EXCEPTION:` prefix so a bug reads differently from a failed
/// expectation. Both are isolated to the one test that raised them.
#[derive(Debug, Error)]
pub enum TestError {
    /// An expectation mismatch, carrying the pre-formatted operands.
    #[error("{0}")]
    Assertion(String),
    /// Any other error escaping a test body or hook.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl TestError {
    /// Wrap an arbitrary error as an unexpected fault.
    pub fn unexpected(error: impl Into<anyhow::Error>) -> Self {
        TestError::Unexpected(error.into())
    }
}

/// A fault in a once-per-suite hook.
///
/// Unlike per-test failures, these abort traversal of the enclosing
/// suite's subtree and propagate out of the run. The summary line is not
/// emitted for an aborted run; events reported before the fault stand.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A `before_all` hook failed; the suite's children never ran.
    #[error("before_all hook failed at {location}: {source}")]
    BeforeAll { location: String, source: TestError },
    /// An `after_all` hook failed after the suite's children ran.
    #[error("after_all hook failed at {location}: {source}")]
    AfterAll { location: String, source: TestError },
}
