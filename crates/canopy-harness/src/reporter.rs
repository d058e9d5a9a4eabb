//! Reporter - render lifecycle events and the final summary
//!
//! The engine talks to a [`Reporter`] trait object; presentation (color,
//! destination) is a pluggable concern. The text contract itself is
//! color-free: recorded lines equal the console lines with coloring
//! stripped.

use crate::error::TestError;
use colored::Colorize;

/// Lifecycle event kinds, in the order a single test can emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// The test is about to run.
    Start,
    Passed,
    Failed,
    /// The test was registered with `xit` and never ran.
    Ignored,
}

/// Rendering seam between the engine and the outside world.
pub trait Reporter {
    /// One lifecycle event for the test identified by `path` (ancestor
    /// suite names, then the test name).
    fn event(&mut self, path: &[&str], kind: LogKind);

    /// Diagnostic detail for a failed test, emitted between its `start`
    /// and `failed` events.
    fn failure(&mut self, error: &TestError);

    /// Final counters. Not called when a fatal error aborted the run.
    fn summary(&mut self, passed: usize, failed: usize, ignored: usize);
}

/// Render one event line, uncolored.
pub fn format_event(path: &[&str], kind: LogKind) -> String {
    let description = path.join(" -> ");
    let marker = match kind {
        LogKind::Start => "...",
        LogKind::Passed => "PASSED",
        LogKind::Failed => "FAILED",
        LogKind::Ignored => "IGNORED",
    };
    format!("{description} {marker}")
}

/// Render the failure diagnostic, uncolored.
///
/// Assertion failures are already formatted as the two operands;
/// anything else is a bug in the suite under test and is prefixed to
/// read as one.
pub fn format_failure(error: &TestError) -> String {
    match error {
        TestError::Assertion(message) => message.clone(),
        TestError::Unexpected(error) => format!("EXCEPTION: {error:#}"),
    }
}

/// Render the summary line, uncolored.
///
/// `test` is singular only when exactly one test ran; ignored tests are
/// excluded from the ran/pass/fail numbers and appear as a trailing
/// count only when there are any.
pub fn format_summary(passed: usize, failed: usize, ignored: usize) -> String {
    let ran = passed + failed;
    if ignored > 0 {
        format!(
            "Ran {ran} {}, {passed} passed, {failed} failed, {ignored} ignored.",
            test_noun(ran)
        )
    } else {
        format!("Ran {ran} {}, {passed} passed, {failed} failed.", test_noun(ran))
    }
}

fn test_noun(ran: usize) -> &'static str {
    if ran == 1 {
        "test"
    } else {
        "tests"
    }
}

/// Writes to stderr, coloring whole event lines: start and ignored
/// yellow, passed green, failed red. Color output follows the `colored`
/// crate's global controls (NO_COLOR, tty detection,
/// `colored::control::set_override`).
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn event(&mut self, path: &[&str], kind: LogKind) {
        let line = format_event(path, kind);
        let line = match kind {
            LogKind::Start | LogKind::Ignored => line.yellow(),
            LogKind::Passed => line.green(),
            LogKind::Failed => line.red(),
        };
        eprintln!("{line}");
    }

    fn failure(&mut self, error: &TestError) {
        eprintln!("{}", format_failure(error));
    }

    fn summary(&mut self, passed: usize, failed: usize, ignored: usize) {
        let ran = passed + failed;
        let passed_part = format!("{passed} passed").green();
        let failed_part = if failed > 0 {
            format!("{failed} failed").red()
        } else {
            format!("{failed} failed").normal()
        };
        if ignored > 0 {
            eprintln!(
                "Ran {ran} {}, {passed_part}, {failed_part}, {ignored} ignored.",
                test_noun(ran)
            );
        } else {
            eprintln!("Ran {ran} {}, {passed_part}, {failed_part}.", test_noun(ran));
        }
    }
}

/// Captures uncolored lines in memory, in emission order.
///
/// Useful for asserting on a run's exact event sequence, both in this
/// crate's tests and in suites that embed the harness.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for RecordingReporter {
    fn event(&mut self, path: &[&str], kind: LogKind) {
        self.lines.push(format_event(path, kind));
    }

    fn failure(&mut self, error: &TestError) {
        self.lines.push(format_failure(error));
    }

    fn summary(&mut self, passed: usize, failed: usize, ignored: usize) {
        self.lines.push(format_summary(passed, failed, ignored));
    }
}
