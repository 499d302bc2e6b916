// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Replay launcher test utilities
//!
//! Every integration test writes its full diagnostics to its own log file
//! under `target/test-logs/`. Passing tests print a single line; failing
//! tests print the log path and size.

pub mod logging;
pub mod macros;

pub use logging::{TestLogError, TestLogger, create_unique_test_log};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_logging_creates_unique_files() {
        let log_path1 = create_unique_test_log("test_logging_creates_unique_files_1");
        let log_path2 = create_unique_test_log("test_logging_creates_unique_files_2");

        assert_ne!(log_path1, log_path2);
        assert!(log_path1.parent().unwrap().exists());

        fs::write(&log_path1, "test content 1").unwrap();
        fs::write(&log_path2, "test content 2").unwrap();
        assert_eq!(fs::read_to_string(&log_path1).unwrap(), "test content 1");
        assert_eq!(fs::read_to_string(&log_path2).unwrap(), "test content 2");

        fs::remove_file(&log_path1).unwrap();
        fs::remove_file(&log_path2).unwrap();
    }

    #[test]
    fn test_logger_writes_header_and_messages() {
        let mut logger = TestLogger::new("test_logger_writes_header_and_messages").unwrap();
        logger.log("first step").unwrap();
        logger.log_json("payload", &serde_json::json!({"state": "watch"})).unwrap();

        let path = logger.finish_success().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("=== Replay Launcher Test Log ==="));
        assert!(content.contains("first step"));
        assert!(content.contains("\"state\": \"watch\""));
        assert!(content.contains("Test completed successfully"));
    }
}
