//! A complete canopy suite, wired up the way an authored test binary
//! would be. The CLI's own tests launch this binary as their
//! end-to-end fixture; `failing` and `fatal` select the unhappy paths.

use canopy_harness::{assert_eq, Harness, TestError};
use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    let mut harness = Harness::new();
    // Mode comes from the first argument, or from the environment when
    // launched through `canopy run` (which takes no per-binary args).
    let mode = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CANOPY_DEMO_MODE").ok());
    match mode.as_deref() {
        Some("failing") => failing(&mut harness),
        Some("fatal") => fatal(&mut harness),
        _ => passing(&mut harness),
    }
    harness.run()
}

fn passing(harness: &mut Harness) {
    harness.describe("arithmetic", |suite| {
        suite.it("adds", || async { assert_eq(2 + 2, 4) });
        suite.it("multiplies", || async { assert_eq(6 * 7, 42) });
        suite.describe("division", |suite| {
            suite.it("divides evenly", || async { assert_eq(10 / 2, 5) });
            suite.xit("handles division by zero", || async { Ok(()) });
        });
    });

    harness.describe("fixtures", |suite| {
        let setups = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&setups);
        suite.before_each(move || {
            let counter = Rc::clone(&counter);
            async move {
                counter.set(counter.get() + 1);
                Ok(())
            }
        });
        let seen = Rc::clone(&setups);
        suite.it("sees the fixture", move || {
            let seen = Rc::clone(&seen);
            async move { assert_eq(seen.get(), 1) }
        });
    });
}

fn failing(harness: &mut Harness) {
    harness.describe("arithmetic", |suite| {
        suite.it("adds", || async { assert_eq(2 + 2, 4) });
        suite.it("is wrong about addition", || async { assert_eq(2 + 2, 5) });
    });
}

fn fatal(harness: &mut Harness) {
    harness.describe("broken fixtures", |suite| {
        suite.before_all(|| async {
            Err(TestError::unexpected(anyhow::anyhow!(
                "could not reach the database"
            )))
        });
        suite.it("never runs", || async { Ok(()) });
    });
}
