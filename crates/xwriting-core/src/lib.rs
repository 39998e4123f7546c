pub mod env;
pub mod guidelines;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use guidelines::{GuidelineSet, GENERIC_WRITING_GUIDELINES, THREAD_WRITING_GUIDELINES};
pub use settings::{AuthMode, Credentials, Identity};

// --- Errors ---

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no auth found: set X_API_KEY, X_API_KEY_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET or X_BEARER_TOKEN")]
    NoCredentials,

    #[error("unknown guideline set '{0}' (expected 'thread' or 'generic')")]
    UnknownGuidelineSet(String),
}

impl CoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

// --- Types (matching X API v2 tweet objects) ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
    #[serde(default)]
    pub impression_count: u64,
}

/// Only returned to the post's author under user-context (OAuth 1.0a) auth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NonPublicMetrics {
    #[serde(default)]
    pub impression_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<PublicMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_public_metrics: Option<NonPublicMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchMeta {
    pub days: u32,
    pub start_time: String,
    pub auth_mode: AuthMode,
    pub username: Option<String>,
    pub user_id: String,
    pub post_count: usize,
}

/// What `fetch --out` writes and `advise --posts` reads back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostsPayload {
    pub meta: FetchMeta,
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub raw_meta: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TopicResearchMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<AuthMode>,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub per_topic_results: u32,
    #[serde(default)]
    pub topic_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TopicResearch {
    pub meta: TopicResearchMeta,
    #[serde(default)]
    pub topics: BTreeMap<String, Vec<Post>>,
}

impl TopicResearch {
    /// Research that could not run; the error is reported instead of results.
    pub fn failed(error: impl Into<String>) -> Self {
        TopicResearch {
            meta: TopicResearchMeta {
                error: Some(error.into()),
                ..TopicResearchMeta::default()
            },
            topics: BTreeMap::new(),
        }
    }
}

// --- Storage ---

/// Read posts from a JSON file. Accepts a fetch payload (its `data` array,
/// empty when absent) or a bare array of posts.
pub fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    parse_posts(&raw)
}

/// Parse posts from raw JSON; see [`read_posts`].
pub fn parse_posts(raw: &str) -> Result<Vec<Post>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(data @ serde_json::Value::Array(_)) => Ok(serde_json::from_value(data)?),
            _ => Ok(vec![]),
        },
        _ => Ok(vec![]),
    }
}

/// Write a fetch payload as pretty JSON, creating parent directories.
///
/// Uses atomic write (temp file + rename) so a reader never sees a
/// half-written file.
pub fn write_posts(path: &Path, payload: &PostsPayload) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| CoreError::io(dir, e))?;
    }
    let json = serde_json::to_string_pretty(payload)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "posts.json".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp, json).map_err(|e| CoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| CoreError::io(path, e))?;
    tracing::debug!(path = %path.display(), posts = payload.data.len(), "wrote posts file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> PostsPayload {
        PostsPayload {
            meta: FetchMeta {
                days: 30,
                start_time: "2026-09-19T00:00:00Z".to_string(),
                auth_mode: AuthMode::Bearer,
                username: Some("writer".to_string()),
                user_id: "42".to_string(),
                post_count: 1,
            },
            data: vec![Post {
                id: "1".to_string(),
                text: "Hello thread".to_string(),
                public_metrics: Some(PublicMetrics {
                    like_count: 3,
                    ..PublicMetrics::default()
                }),
                ..Post::default()
            }],
            raw_meta: serde_json::json!({ "result_count": 1 }),
        }
    }

    #[test]
    fn write_then_read_posts_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/posts.json");
        let payload = sample_payload();

        write_posts(&path, &payload).unwrap();
        let posts = read_posts(&path).unwrap();

        assert_eq!(posts, payload.data);
        assert!(!path.with_file_name(".posts.json.tmp").exists());
    }

    #[test]
    fn parses_bare_array() {
        let posts = parse_posts(r#"[{"id":"9","text":"hi","lang":"en"}]"#).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "hi");
        assert!(posts[0].public_metrics.is_none());
    }

    #[test]
    fn object_without_data_is_empty() {
        assert!(parse_posts(r#"{"meta":{}}"#).unwrap().is_empty());
        assert!(parse_posts("42").unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_posts(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn failed_research_carries_error() {
        let research = TopicResearch::failed("boom");
        assert_eq!(research.meta.error.as_deref(), Some("boom"));
        assert!(research.topics.is_empty());
    }
}
