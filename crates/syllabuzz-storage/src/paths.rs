//! Path utilities for Syllabuzz directory resolution.
//!
//! This is the canonical source for shared path functions. Re-exported by
//! syllabuzz-core for convenience.

use anyhow::Result;
use std::path::PathBuf;

const SYLLABUZZ_DIR: &str = ".syllabuzz";
const DB_FILE: &str = "syllabuzz.db";
const CONFIG_FILE: &str = "config.toml";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the Syllabuzz directory.
pub const SYLLABUZZ_DIR_ENV: &str = "SYLLABUZZ_DIR";

/// Resolve the Syllabuzz data directory.
/// Priority: SYLLABUZZ_DIR env var > ~/.syllabuzz/
pub fn resolve_syllabuzz_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(SYLLABUZZ_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(SYLLABUZZ_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Database file inside a data directory.
pub fn database_path_in(dir: impl Into<PathBuf>) -> PathBuf {
    dir.into().join(DB_FILE)
}

/// Get the config file path: ~/.syllabuzz/config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(resolve_syllabuzz_dir()?.join(CONFIG_FILE))
}

/// Logs directory inside a data directory, created if missing.
pub fn ensure_logs_dir_in(dir: impl Into<PathBuf>) -> Result<PathBuf> {
    let dir = dir.into().join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_in() {
        let path = database_path_in("/tmp/syllabuzz-test");
        assert_eq!(path, PathBuf::from("/tmp/syllabuzz-test/syllabuzz.db"));
    }
}
