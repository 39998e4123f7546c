//! Minimal `.env` file support. Values never override variables already set
//! in the process environment.

use std::fs;
use std::path::{Path, PathBuf};

/// Parse one `KEY=value` line. Blank lines, `#` comments, lines without `=`
/// and lines with an empty key yield `None`.
pub fn parse_env_line(line: &str) -> Option<(String, String)> {
    let stripped = line.trim();
    if stripped.is_empty() || stripped.starts_with('#') {
        return None;
    }
    let (key, value) = stripped.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('\'').trim_matches('"');
    Some((key.to_string(), value.to_string()))
}

/// Load every existing file in `paths`, in order. Returns the files loaded.
pub fn load_env_files<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut loaded = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            continue;
        }
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable env file");
                continue;
            }
        };
        let mut applied = 0usize;
        for (key, value) in contents.lines().filter_map(parse_env_line) {
            if std::env::var_os(&key).is_none() {
                std::env::set_var(&key, value);
                applied += 1;
            }
        }
        tracing::debug!(path = %path.display(), applied, "loaded env file");
        loaded.push(path.to_path_buf());
    }
    loaded
}

/// `.env` in the working directory, then the per-user config file.
pub fn default_env_candidates(cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join(".env")];
    if let Some(config) = dirs::config_dir() {
        candidates.push(config.join("x-writing").join(".env"));
    }
    candidates
}
