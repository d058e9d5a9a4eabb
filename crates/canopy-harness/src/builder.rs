//! Tree builder - the declarative registration API
//!
//! A [`Harness`] is the whole collection context in one value: the tree
//! under construction and the cursor marking the suite that registration
//! calls currently target. Nothing is process-global, so independent
//! harnesses (for instance in tests of the harness itself) never
//! interfere.

use crate::engine::{self, RunSummary};
use crate::error::{FatalError, TestResult};
use crate::reporter::{ConsoleReporter, Reporter};
use crate::tree::{Hook, Suite, TestFn, TestNode};
use colored::Colorize;
use futures_util::FutureExt;
use std::future::Future;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::process::ExitCode;

/// Collects a test tree and runs it.
///
/// Registration happens through `&mut self` during the synchronous
/// collection phase; execution takes `&self` and never mutates the tree.
/// The two phases cannot overlap.
pub struct Harness {
    root: Suite,
    /// Path of child indices from the root to the current suite.
    cursor: Vec<usize>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Create an empty harness. The root suite is anonymous: it
    /// contributes no segment to reported test descriptions.
    pub fn new() -> Self {
        Harness {
            root: Suite::default(),
            cursor: Vec::new(),
        }
    }

    /// The collected tree.
    pub fn tree(&self) -> &Suite {
        &self.root
    }

    fn current_mut(&mut self) -> &mut Suite {
        let mut suite = &mut self.root;
        for &index in &self.cursor {
            suite = match &mut suite.children[index].1 {
                TestNode::Suite(child) => child,
                _ => unreachable!("cursor always points at a suite"),
            };
        }
        suite
    }

    /// Register a nested suite.
    ///
    /// `body` runs immediately with the cursor moved into the new suite;
    /// the cursor is restored on every exit path, including a panic
    /// escaping `body`. The panic itself is not recovered: it resumes
    /// after the cursor is popped and aborts collection.
    pub fn describe(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Self)) {
        let current = self.current_mut();
        let index = current.children.len();
        current
            .children
            .push((name.into(), TestNode::Suite(Suite::default())));
        self.cursor.push(index);
        let outcome = catch_unwind(AssertUnwindSafe(|| body(self)));
        self.cursor.pop();
        if let Err(panic) = outcome {
            resume_unwind(panic);
        }
    }

    /// Register a test in the current suite.
    ///
    /// The body may suspend at await points; a body with no awaits is
    /// simply a future that completes immediately. The engine awaits
    /// every body uniformly.
    pub fn it<F, Fut>(&mut self, name: impl Into<String>, test: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        let test: TestFn = Box::new(move || test().boxed_local());
        self.current_mut()
            .children
            .push((name.into(), TestNode::Test(test)));
    }

    /// Alias for [`it`](Harness::it).
    pub fn test<F, Fut>(&mut self, name: impl Into<String>, test: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        self.it(name, test);
    }

    /// Register a disabled test. The body is type-checked but dropped;
    /// it is never stored and never runs.
    pub fn xit<F, Fut>(&mut self, name: impl Into<String>, _test: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        self.current_mut()
            .children
            .push((name.into(), TestNode::Ignored));
    }

    /// Run before every test nested anywhere beneath the current suite.
    pub fn before_each<F, Fut>(&mut self, hook: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        let hook: Hook = Box::new(move || hook().boxed_local());
        self.current_mut().before_each.push(hook);
    }

    /// Run after every test nested anywhere beneath the current suite,
    /// whether or not the test failed.
    pub fn after_each<F, Fut>(&mut self, hook: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        let hook: Hook = Box::new(move || hook().boxed_local());
        self.current_mut().after_each.push(hook);
    }

    /// Run once before the current suite's children, however many tests
    /// the suite contains (including none). A failure here is fatal to
    /// the run, not isolated like a test failure.
    pub fn before_all<F, Fut>(&mut self, hook: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        let hook: Hook = Box::new(move || hook().boxed_local());
        self.current_mut().before_all.push(hook);
    }

    /// Run once after the current suite's children; fatal on failure,
    /// like [`before_all`](Harness::before_all).
    pub fn after_all<F, Fut>(&mut self, hook: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        let hook: Hook = Box::new(move || hook().boxed_local());
        self.current_mut().after_all.push(hook);
    }

    /// Execute the collected tree against a reporter of the caller's
    /// choosing, returning the counters (or the fatal error that aborted
    /// the run).
    pub async fn run_with(&self, reporter: &mut dyn Reporter) -> Result<RunSummary, FatalError> {
        engine::run_tree(&self.root, reporter).await
    }

    /// Execute the collected tree and map the outcome to an exit code.
    ///
    /// Builds a current-thread tokio runtime (execution is cooperatively
    /// scheduled on one thread; sibling order is registration order, not
    /// scheduler order) and reports to stderr through the console
    /// reporter. There is no timeout: a body that never completes stalls
    /// the run.
    pub fn run(&self) -> ExitCode {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(error) => {
                eprintln!("failed to start the test runtime: {error}");
                return ExitCode::FAILURE;
            }
        };
        let mut reporter = ConsoleReporter;
        match runtime.block_on(self.run_with(&mut reporter)) {
            Ok(summary) if summary.success() => ExitCode::SUCCESS,
            Ok(_) => ExitCode::FAILURE,
            Err(fatal) => {
                eprintln!("{}", fatal.to_string().red());
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(suite: &Suite) -> Vec<&str> {
        suite
            .children
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    #[test]
    fn children_keep_registration_order() {
        let mut harness = Harness::new();
        harness.it("first", || async { Ok(()) });
        harness.describe("second", |_| {});
        harness.xit("third", || async { Ok(()) });
        assert_eq!(names(harness.tree()), vec!["first", "second", "third"]);
    }

    #[test]
    fn describe_nests_registrations() {
        let mut harness = Harness::new();
        harness.describe("outer", |suite| {
            suite.it("inner test", || async { Ok(()) });
            suite.describe("inner suite", |suite| {
                suite.it("deep", || async { Ok(()) });
            });
        });
        let (_, outer) = &harness.tree().children[0];
        let TestNode::Suite(outer) = outer else {
            panic!("expected a suite");
        };
        assert_eq!(names(outer), vec!["inner test", "inner suite"]);
    }

    #[test]
    fn xit_stores_an_ignored_node() {
        let mut harness = Harness::new();
        harness.xit("disabled", || async { panic!("must never be stored") });
        assert!(matches!(
            harness.tree().children[0].1,
            TestNode::Ignored
        ));
    }

    #[test]
    fn hooks_append_in_registration_order() {
        let mut harness = Harness::new();
        harness.before_each(|| async { Ok(()) });
        harness.before_each(|| async { Ok(()) });
        harness.after_each(|| async { Ok(()) });
        harness.before_all(|| async { Ok(()) });
        harness.after_all(|| async { Ok(()) });
        let root = harness.tree();
        assert_eq!(root.before_each.len(), 2);
        assert_eq!(root.after_each.len(), 1);
        assert_eq!(root.before_all.len(), 1);
        assert_eq!(root.after_all.len(), 1);
    }

    #[test]
    fn cursor_is_restored_when_a_describe_body_panics() {
        let mut harness = Harness::new();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            harness.describe("faulty", |suite| {
                suite.it("registered before the fault", || async { Ok(()) });
                panic!("collection fault");
            });
        }));
        assert!(outcome.is_err());
        // Registration targets the root again, not the abandoned suite.
        harness.it("after the fault", || async { Ok(()) });
        assert_eq!(names(harness.tree()), vec!["faulty", "after the fault"]);
    }

    #[test]
    fn test_is_an_alias_for_it() {
        let mut harness = Harness::new();
        harness.test("aliased", || async { Ok(()) });
        assert!(matches!(harness.tree().children[0].1, TestNode::Test(_)));
    }
}
