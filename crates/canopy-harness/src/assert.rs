//! Equality assertion for test bodies

use crate::error::{TestError, TestResult};
use std::fmt::Debug;

/// Compare two values, failing the test on mismatch.
///
/// Equality is `PartialEq`; the diagnostic formats both operands with
/// `Debug`, stacked around a `!==` marker so multi-line values stay
/// readable. The mismatch is the expected failure signal — the engine
/// reports it as a failed expectation, not as a bug in the suite.
///
/// ```
/// use canopy_harness::assert_eq;
///
/// assert!(assert_eq(2 + 2, 4).is_ok());
/// assert!(assert_eq(2 + 2, 5).is_err());
/// ```
pub fn assert_eq<T: PartialEq + Debug>(a: T, b: T) -> TestResult {
    if a != b {
        return Err(TestError::Assertion(format!("{a:?}\n    !==\n{b:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_pass() {
        assert!(assert_eq(1, 1).is_ok());
        assert!(assert_eq("same", "same").is_ok());
        assert!(assert_eq(vec![1, 2], vec![1, 2]).is_ok());
    }

    #[test]
    fn mismatch_carries_both_operands() {
        let Err(TestError::Assertion(message)) = assert_eq(1, 2) else {
            panic!("expected an assertion failure");
        };
        assert_eq!(message, "1\n    !==\n2");
    }

    #[test]
    fn operands_format_with_debug() {
        let Err(TestError::Assertion(message)) = assert_eq(Some("a"), None) else {
            panic!("expected an assertion failure");
        };
        assert_eq!(message, "Some(\"a\")\n    !==\nNone");
    }
}
