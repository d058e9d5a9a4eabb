//! Execution engine - depth-first traversal of a finished test tree
//!
//! The engine owns all run state (counters, description stack, hook
//! chain) in an [`ExecutionContext`] created fresh per run; the tree is
//! only read. Tests run strictly one at a time, in registration order,
//! with each test's effective body composed from its ancestors' each-
//! hooks at the moment it executes.

use crate::error::{FatalError, TestResult};
use crate::reporter::{LogKind, Reporter};
use crate::tree::{Hook, Suite, TestFn, TestNode};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;

/// Counters for a completed (non-aborted) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub ignored: usize,
}

impl RunSummary {
    /// True when the run should map to a successful exit status.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// One ancestor's each-hook lists, innermost last.
struct ChainFrame<'t> {
    before_each: &'t [Hook],
    after_each: &'t [Hook],
}

/// Per-run state, exclusively owned by the engine.
struct ExecutionContext<'t> {
    passed: usize,
    failed: usize,
    ignored: usize,
    /// Suite names from the root down; a test pushes its own name while
    /// it is being reported.
    path: Vec<&'t str>,
    /// Each-hook lists of every suite on the path, root first.
    chain: Vec<ChainFrame<'t>>,
}

impl<'t> ExecutionContext<'t> {
    fn new() -> Self {
        ExecutionContext {
            passed: 0,
            failed: 0,
            ignored: 0,
            path: Vec::new(),
            chain: Vec::new(),
        }
    }

    fn location(&self) -> String {
        if self.path.is_empty() {
            "top level".to_string()
        } else {
            self.path.join(" -> ")
        }
    }
}

/// Run a finished tree against a reporter.
///
/// Returns the counters of a completed run, or the fatal error if a
/// `before_all`/`after_all` hook failed. On the fatal path no summary is
/// emitted: events reported before the fault stand, but a partial count
/// would read as a completed run.
pub async fn run_tree(root: &Suite, reporter: &mut dyn Reporter) -> Result<RunSummary, FatalError> {
    let mut context = ExecutionContext::new();
    run_suite(root, &mut context, reporter).await?;
    reporter.summary(context.passed, context.failed, context.ignored);
    Ok(RunSummary {
        passed: context.passed,
        failed: context.failed,
        ignored: context.ignored,
    })
}

/// Traverse one suite. The caller has already pushed the suite's name
/// onto the description stack (nothing is pushed for the anonymous
/// root).
fn run_suite<'t, 'a>(
    suite: &'t Suite,
    context: &'a mut ExecutionContext<'t>,
    reporter: &'a mut dyn Reporter,
) -> LocalBoxFuture<'a, Result<(), FatalError>>
where
    't: 'a,
{
    async move {
        // Once per suite, regardless of how many tests it contains.
        for hook in &suite.before_all {
            if let Err(source) = hook().await {
                return Err(FatalError::BeforeAll {
                    location: context.location(),
                    source,
                });
            }
        }

        // The root's frame is pushed like any other so that top-level
        // each-hooks apply to every test in the tree.
        context.chain.push(ChainFrame {
            before_each: &suite.before_each,
            after_each: &suite.after_each,
        });

        let mut fatal = None;
        for (name, child) in &suite.children {
            match child {
                TestNode::Test(test) => run_test(name, test, context, reporter).await,
                TestNode::Ignored => {
                    context.path.push(name);
                    reporter.event(&context.path, LogKind::Ignored);
                    context.path.pop();
                    context.ignored += 1;
                }
                TestNode::Suite(child_suite) => {
                    context.path.push(name);
                    let outcome = run_suite(child_suite, context, reporter).await;
                    context.path.pop();
                    if let Err(error) = outcome {
                        fatal = Some(error);
                        break;
                    }
                }
            }
        }

        context.chain.pop();
        if let Some(error) = fatal {
            return Err(error);
        }

        for hook in &suite.after_all {
            if let Err(source) = hook().await {
                return Err(FatalError::AfterAll {
                    location: context.location(),
                    source,
                });
            }
        }
        Ok(())
    }
    .boxed_local()
}

/// Run one test with its composed hooks; failures are isolated here and
/// never propagate to the sibling loop.
async fn run_test<'t>(
    name: &'t str,
    test: &'t TestFn,
    context: &mut ExecutionContext<'t>,
    reporter: &mut dyn Reporter,
) {
    context.path.push(name);
    reporter.event(&context.path, LogKind::Start);
    let outcome = run_composed(test, &context.chain).await;
    match outcome {
        Ok(()) => {
            context.passed += 1;
            reporter.event(&context.path, LogKind::Passed);
        }
        Err(error) => {
            context.failed += 1;
            reporter.failure(&error);
            reporter.event(&context.path, LogKind::Failed);
        }
    }
    context.path.pop();
}

/// The effective test body: every ancestor's `before_each` hooks
/// outermost suite first, then the body, then every ancestor's
/// `after_each` hooks innermost suite first (registration order within a
/// suite). A failure in the setup prefix skips the rest of it, body
/// included; teardown always runs. The first error decides the outcome.
async fn run_composed(test: &TestFn, chain: &[ChainFrame<'_>]) -> TestResult {
    let mut outcome = async {
        for frame in chain {
            for hook in frame.before_each {
                hook().await?;
            }
        }
        test().await
    }
    .await;

    for frame in chain.iter().rev() {
        for hook in frame.after_each {
            if let Err(error) = hook().await {
                outcome = outcome.and(Err(error));
            }
        }
    }
    outcome
}
