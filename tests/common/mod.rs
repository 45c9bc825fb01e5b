//! Common test utilities for siteweave CLI and scenario tests.
//!
//! `TestEnv` is an isolated environment with a temporary project directory
//! and a temporary HOME, so user configuration never leaks into a test.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a siteweave CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON line {l:?}: {e}")))
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_siteweave")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file below the project directory, creating parents
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    /// Run siteweave from the project directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("SITEWEAVE_VERBOSITY")
            .env_remove("SITEWEAVE_COLOR")
            .env_remove("SITEWEAVE_OUTPUT")
            .env_remove("SITEWEAVE_ROOT_ID")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute siteweave");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// A page with a three-level menu, the overlay controls and one footnote
pub const MENU_PAGE: &str = concat!(
    r#"<!DOCTYPE html><html><body>"#,
    r##"<button id="back">Back</button><a id="back-to-top" href="#">Top</a>"##,
    r#"<nav><x-menu id="top-menu" label="Menu"><a href="/">Home</a>"#,
    r#"<x-menu id="a" label="A"><a href="/a/1">A1</a>"#,
    r#"<x-menu id="b" label="B"><a href="/b/1">B1</a></x-menu>"#,
    r#"</x-menu></x-menu></nav>"#,
    r#"<main><p>Text<x-footnote>a note</x-footnote></p></main>"#,
    r#"</body></html>"#,
);

/// A menu with no label, which is an error
pub const BROKEN_PAGE: &str = r#"<x-menu id="nav"><a href="/">Home</a></x-menu>"#;

/// A fourth nesting level, which is a warning
pub const TOO_DEEP_PAGE: &str = concat!(
    r#"<x-menu id="top-menu" label="1"><x-menu id="l2" label="2">"#,
    r#"<x-menu id="l3" label="3"><x-menu id="l4" label="4"><a>deep</a></x-menu>"#,
    r#"</x-menu></x-menu></x-menu>"#,
);
