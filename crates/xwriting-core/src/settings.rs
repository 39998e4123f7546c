use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[serde(rename = "oauth1")]
    OAuth1,
    Bearer,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthMode::OAuth1 => "oauth1",
            AuthMode::Bearer => "bearer",
        })
    }
}

/// X API credentials. Empty values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub api_key_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub bearer_token: Option<String>,
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("oauth1", &self.has_oauth1())
            .field("bearer", &self.bearer_token.is_some())
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Credentials {
            api_key: get("X_API_KEY"),
            api_key_secret: get("X_API_KEY_SECRET"),
            access_token: get("X_ACCESS_TOKEN"),
            access_token_secret: get("X_ACCESS_TOKEN_SECRET"),
            bearer_token: get("X_BEARER_TOKEN"),
        }
    }

    pub fn has_oauth1(&self) -> bool {
        self.api_key.is_some()
            && self.api_key_secret.is_some()
            && self.access_token.is_some()
            && self.access_token_secret.is_some()
    }

    /// OAuth 1.0a wins when fully configured; it also unlocks non-public metrics.
    pub fn auth_mode(&self) -> Result<AuthMode> {
        if self.has_oauth1() {
            Ok(AuthMode::OAuth1)
        } else if self.bearer_token.is_some() {
            Ok(AuthMode::Bearer)
        } else {
            Err(CoreError::NoCredentials)
        }
    }
}

/// Default account to read from when no flag is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl Identity {
    pub fn from_env() -> Self {
        let get = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Identity {
            username: get("X_USERNAME"),
            user_id: get("X_USER_ID"),
        }
    }

    /// Explicit values take precedence over the environment defaults.
    pub fn or(self, fallback: Identity) -> Identity {
        Identity {
            username: self.username.or(fallback.username),
            user_id: self.user_id.or(fallback.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn creds(pairs: &[(&str, &str)]) -> Credentials {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Credentials::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn oauth1_preferred_when_complete() {
        let c = creds(&[
            ("X_API_KEY", "k"),
            ("X_API_KEY_SECRET", "ks"),
            ("X_ACCESS_TOKEN", "t"),
            ("X_ACCESS_TOKEN_SECRET", "ts"),
            ("X_BEARER_TOKEN", "b"),
        ]);
        assert_eq!(c.auth_mode().unwrap(), AuthMode::OAuth1);
    }

    #[test]
    fn partial_oauth_falls_back_to_bearer() {
        let c = creds(&[("X_API_KEY", "k"), ("X_BEARER_TOKEN", "b")]);
        assert_eq!(c.auth_mode().unwrap(), AuthMode::Bearer);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let c = creds(&[("X_BEARER_TOKEN", "")]);
        assert!(matches!(c.auth_mode(), Err(CoreError::NoCredentials)));
    }

    #[test]
    fn debug_hides_secrets() {
        let c = creds(&[("X_BEARER_TOKEN", "super-secret")]);
        assert!(!format!("{c:?}").contains("super-secret"));
    }

    #[test]
    fn auth_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AuthMode::OAuth1).unwrap(), "\"oauth1\"");
        assert_eq!(serde_json::to_string(&AuthMode::Bearer).unwrap(), "\"bearer\"");
    }

    #[test]
    fn explicit_identity_wins() {
        let explicit = Identity {
            username: Some("cli".into()),
            user_id: None,
        };
        let env = Identity {
            username: Some("env".into()),
            user_id: Some("7".into()),
        };
        let merged = explicit.or(env);
        assert_eq!(merged.username.as_deref(), Some("cli"));
        assert_eq!(merged.user_id.as_deref(), Some("7"));
    }
}
