//! Test tree - the passive data model built during collection
//!
//! A tree is built once by the [`Harness`](crate::Harness) and then only
//! read by the engine; nothing mutates it during execution.

use crate::error::TestResult;
use futures_util::future::LocalBoxFuture;

/// Boxed future returned by test bodies and hooks.
///
/// Execution is pinned to one thread, so futures are not required to be
/// `Send` and suite state can live in `Rc`/`Cell`.
pub type TestFuture = LocalBoxFuture<'static, TestResult>;

/// A registered test body, callable once per run.
pub type TestFn = Box<dyn Fn() -> TestFuture>;

/// A registered lifecycle hook.
///
/// Each-hooks run once per descendant test, all-hooks once per suite, so
/// hooks share the `Fn` calling convention with test bodies.
pub type Hook = Box<dyn Fn() -> TestFuture>;

/// A node in the test tree. The child's name lives in the parent's
/// `children` list, alongside the node.
pub enum TestNode {
    /// A runnable leaf test.
    Test(TestFn),
    /// A test registered with `xit`; never executed.
    Ignored,
    /// A nested suite.
    Suite(Suite),
}

/// A named grouping of tests and nested suites, with its lifecycle hooks.
///
/// All lists preserve registration order; traversal and reporting follow
/// that order exactly.
#[derive(Default)]
pub struct Suite {
    pub(crate) children: Vec<(String, TestNode)>,
    pub(crate) before_each: Vec<Hook>,
    pub(crate) after_each: Vec<Hook>,
    pub(crate) before_all: Vec<Hook>,
    pub(crate) after_all: Vec<Hook>,
}

impl Suite {
    /// Number of direct children (tests, ignored tests, and suites).
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True if the suite has no children at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
