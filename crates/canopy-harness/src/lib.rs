//! Canopy harness - declarative test suites with lifecycle hooks
//!
//! A harness is built in two phases. During the synchronous collection
//! phase, `describe`/`it`/`xit` and the four hook registrars populate a
//! tree of suites and tests. Execution then walks the finished tree
//! depth-first: `before_all`/`after_all` run once per suite,
//! `before_each`/`after_each` wrap every test nested beneath their suite
//! (outermost setup first, teardown mirrored), failures are isolated to
//! the test that raised them, and the final summary decides the exit
//! status.
//!
//! ```
//! use canopy_harness::{assert_eq, Harness};
//!
//! let mut harness = Harness::new();
//! harness.describe("arithmetic", |suite| {
//!     suite.it("adds", || async { assert_eq(2 + 2, 4) });
//!     suite.xit("not yet", || async { Ok(()) });
//! });
//! let _status = harness.run();
//! ```

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assert;
pub mod builder;
pub mod engine;
pub mod error;
pub mod reporter;
pub mod tree;

// Re-export the registration and execution surface
pub use assert::assert_eq;
pub use builder::Harness;
pub use engine::{run_tree, RunSummary};
pub use error::{FatalError, TestError, TestResult};
pub use reporter::{ConsoleReporter, LogKind, RecordingReporter, Reporter};
pub use tree::{Hook, Suite, TestFn, TestFuture, TestNode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
