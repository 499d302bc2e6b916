// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Assertion macros that record their outcome in a [`crate::TestLogger`]

/// Logged assertion: writes the condition and its outcome to the test log,
/// then panics when it does not hold.
#[macro_export]
macro_rules! logged_assert {
    ($logger:expr, $condition:expr) => {
        $crate::logged_assert!($logger, $condition, stringify!($condition))
    };
    ($logger:expr, $condition:expr, $message:expr) => {
        if let Err(e) = $logger.log(&format!("Asserting: {}", $message)) {
            eprintln!("Warning: Failed to write to test log: {}", e);
        }

        if $condition {
            if let Err(e) = $logger.log("✓ Assertion passed") {
                eprintln!("Warning: Failed to write to test log: {}", e);
            }
        } else {
            if let Err(e) = $logger.log("✗ Assertion failed") {
                eprintln!("Warning: Failed to write to test log: {}", e);
            }
            panic!("Assertion failed: {}", $message);
        }
    };
}

/// Logged equality assertion
#[macro_export]
macro_rules! logged_assert_eq {
    ($logger:expr, $left:expr, $right:expr) => {{
        let left = &$left;
        let right = &$right;
        if let Err(e) = $logger.log(&format!(
            "Asserting equality: {} == {}",
            stringify!($left),
            stringify!($right)
        )) {
            eprintln!("Warning: Failed to write to test log: {}", e);
        }

        if left == right {
            if let Err(e) = $logger.log("✓ Equality assertion passed") {
                eprintln!("Warning: Failed to write to test log: {}", e);
            }
        } else {
            let message = format!(
                "assertion failed: `(left == right)`\n  left: `{:?}`,\n right: `{:?}`",
                left, right
            );
            if let Err(e) = $logger.log(&format!("✗ Equality assertion failed: {}", message)) {
                eprintln!("Warning: Failed to write to test log: {}", e);
            }
            panic!("{}", message);
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::TestLogger;

    #[test]
    fn test_assertion_helpers() {
        let mut logger = TestLogger::new("test_assertion_helpers").unwrap();
        logged_assert!(logger, 1 + 1 == 2);
        logged_assert_eq!(logger, "watch", "watch");

        let result = std::panic::catch_unwind(|| {
            let mut inner_logger = TestLogger::new("inner_test").unwrap();
            logged_assert!(inner_logger, false, "This should fail");
        });
        assert!(result.is_err(), "logged_assert should have panicked");

        let result = std::panic::catch_unwind(|| {
            let mut inner_logger = TestLogger::new("inner_test_2").unwrap();
            logged_assert_eq!(inner_logger, 1, 2);
        });
        assert!(result.is_err(), "logged_assert_eq should have panicked");

        logger.finish_success().unwrap();
    }
}
