//! Integration Test Harness
//!
//! `SheetTest` runs the real `sheetd` binary inside a temporary working
//! directory, so every test gets its own character files and config.
//!
//! # Example
//!
//! ```rust,ignore
//! let t = SheetTest::new().unwrap();
//! let path = t.new_character("Aria").unwrap();
//! let out = t.run(&["show", path.to_str().unwrap()]).unwrap();
//! assert!(out.stdout.contains("Aria"));
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use sheetd::{storage, Character};
use tempfile::TempDir;

/// Captured output of one `sheetd` invocation
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated working directory for `sheetd` runs
pub struct SheetTest {
    /// Temp directory for character files (cleaned up on drop)
    temp_dir: TempDir,
}

impl SheetTest {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Working directory of every run
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir().join(name)
    }

    /// Run the binary with `args`
    pub fn run(&self, args: &[&str]) -> Result<RunOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_sheetd"))
            .args(args)
            .current_dir(self.dir())
            .env_remove("RUST_LOG")
            .env_remove("SHEETD_SHEET_DIR")
            .env_remove("SHEETD_DEFAULT_NAME")
            .env_remove("SHEETD_LOG_FILTER")
            .output()
            .map_err(|e| anyhow::anyhow!("Failed to spawn sheetd: {}", e))?;

        Ok(RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Create a character file through `sheetd new`; returns its path
    pub fn new_character(&self, name: &str) -> Result<PathBuf> {
        let out = self.run(&["new", "--name", name])?;
        if !out.success {
            anyhow::bail!("sheetd new failed: {}", out.stderr);
        }
        // Printed relative to the working directory
        Ok(self.dir().join(out.stdout.trim()))
    }

    /// Write a character file directly
    pub fn write_character(&self, file: &str, character: &Character) -> Result<PathBuf> {
        let path = self.path(file);
        storage::save_to(character, &path)?;
        Ok(path)
    }

    /// Read a character file back
    pub fn load(&self, path: &Path) -> Result<Character> {
        Ok(storage::load(path)?)
    }
}
