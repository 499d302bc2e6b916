// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-test log files
//!
//! Each test gets its own file under `target/test-logs/<date>/` holding the
//! requests, replies and assertions it went through. Stdout only gets one
//! line per passing test.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

const MAX_TEST_NAME_LEN: usize = 200;

#[derive(Error, Debug)]
pub enum TestLogError {
    #[error("test log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("test log JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid test name: {name:?}")]
    InvalidTestName { name: String },
}

/// Log file owned by one test
pub struct TestLogger {
    path: PathBuf,
    writer: BufWriter<File>,
    test_name: String,
    started: DateTime<Utc>,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Result<Self, TestLogError> {
        if test_name.is_empty() || test_name.len() > MAX_TEST_NAME_LEN {
            return Err(TestLogError::InvalidTestName {
                name: test_name.chars().take(MAX_TEST_NAME_LEN).collect(),
            });
        }

        let path = create_unique_test_log(test_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        let started = Utc::now();
        writeln!(writer, "=== Replay Launcher Test Log ===")?;
        writeln!(writer, "Test: {}", test_name)?;
        writeln!(writer, "Started: {}", started.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(Self {
            path,
            writer,
            test_name: test_name.to_string(),
            started,
        })
    }

    /// Append a timestamped line
    pub fn log(&mut self, message: &str) -> Result<(), TestLogError> {
        writeln!(self.writer, "[{}] {}", Utc::now().format("%H:%M:%S%.3f"), message)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Append `label: <pretty JSON>`
    pub fn log_json<T: serde::Serialize>(
        &mut self,
        label: &str,
        data: &T,
    ) -> Result<(), TestLogError> {
        let json = serde_json::to_string_pretty(data)?;
        self.log(&format!("{}: {}", label, json))
    }

    /// Close the log and report the pass; returns the log path
    pub fn finish_success(mut self) -> Result<PathBuf, TestLogError> {
        let elapsed = Utc::now().signed_duration_since(self.started);
        self.log(&format!(
            "Test completed successfully in {}ms",
            elapsed.num_milliseconds()
        ))?;

        println!("✅ {} passed", self.test_name);
        Ok(self.path)
    }
}

/// Fresh log path: `target/test-logs/YYYY-MM-DD/<test>-HH-MM-SS-<uuid>.log`
pub fn create_unique_test_log(test_name: &str) -> PathBuf {
    let now = Utc::now();
    let dir = workspace_root()
        .join("target")
        .join("test-logs")
        .join(now.format("%Y-%m-%d").to_string());

    if let Err(e) = fs::create_dir_all(&dir) {
        panic!("cannot create test log directory {}: {}", dir.display(), e);
    }

    dir.join(format!(
        "{}-{}-{}.log",
        sanitize_filename(test_name),
        now.format("%H-%M-%S"),
        Uuid::new_v4()
    ))
}

/// Nearest ancestor holding a `[workspace]` manifest, else the current dir
fn workspace_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.ancestors()
        .find(|dir| is_workspace_root(dir))
        .map(Path::to_path_buf)
        .unwrap_or(cwd)
}

fn is_workspace_root(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .map(|manifest| manifest.contains("[workspace]"))
        .unwrap_or(false)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
