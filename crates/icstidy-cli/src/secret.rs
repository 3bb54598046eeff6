//! Secret reference resolver.
//!
//! Credential values in `config.toml` can use special prefixes to
//! reference secrets stored outside the file:
//!
//! - `env::VAR_NAME` — reads `$VAR_NAME` from the environment
//! - `file::path` — reads the first line of the file at `path`
//! - anything else — returned as-is (plain text)

use std::path::Path;

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else if let Some(path) = value.strip_prefix("file::") {
        resolve_file(path)
    } else {
        Ok(value.to_string())
    }
}

/// Reads an environment variable.
fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

/// Reads the first line of a file.
fn resolve_file(path: &str) -> Result<String, String> {
    let content = std::fs::read_to_string(Path::new(path))
        .map_err(|e| format!("failed to read secret file `{}`: {}", path, e))?;
    content
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("secret file `{}` is empty", path))
}
