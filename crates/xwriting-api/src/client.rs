use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use xwriting_core::{
    AuthMode, Credentials, FetchMeta, Identity, Post, PostsPayload, TopicResearch,
    TopicResearchMeta,
};

use crate::oauth::{self, percent_encode};
use crate::{ApiError, Result};

pub const API_BASE: &str = "https://api.x.com/2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Start of a lookback window, e.g. `2026-09-19T08:30:00Z`.
pub fn iso_utc_now_minus_days(days: u32) -> Result<String> {
    iso_utc_minus_days(Utc::now(), days)
}

fn iso_utc_minus_days(now: DateTime<Utc>, days: u32) -> Result<String> {
    let start = TimeDelta::try_days(i64::from(days))
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or(ApiError::InvalidLookback(days))?;
    Ok(start.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Recent-search query for a topic. Replies and reposts are excluded to bias
/// toward primary authored posts. Blank topics yield `None`.
pub fn topic_query(topic: &str) -> Option<String> {
    let cleaned = topic.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }
    Some(format!("({cleaned}) lang:en -is:retweet -is:reply"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub days: u32,
    pub max_results: u32,
    pub identity: Identity,
}

impl Default for FetchRequest {
    fn default() -> Self {
        FetchRequest {
            days: 30,
            max_results: 100,
            identity: Identity::default(),
        }
    }
}

#[derive(Deserialize)]
struct PostsResponse {
    #[serde(default)]
    data: Vec<Post>,
    #[serde(default)]
    meta: serde_json::Value,
}

#[derive(Deserialize)]
struct UserResponse {
    data: Option<UserData>,
}

#[derive(Deserialize)]
struct UserData {
    id: Option<String>,
}

pub struct XClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    auth_mode: AuthMode,
}

impl XClient {
    /// Fails when neither OAuth 1.0a nor bearer credentials are configured.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let auth_mode = credentials.auth_mode()?;
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(XClient {
            http,
            base_url: API_BASE.to_string(),
            credentials,
            auth_mode,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    fn authorization(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        match self.auth_mode {
            AuthMode::OAuth1 => oauth::oauth1_header("GET", url, params, &self.credentials),
            AuthMode::Bearer => self
                .credentials
                .bearer_token
                .as_deref()
                .map(|token| format!("Bearer {token}"))
                .ok_or(ApiError::Core(xwriting_core::CoreError::NoCredentials)),
        }
    }

    async fn get<T>(&self, path: &str, params: Vec<(String, String)>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let auth = self.authorization(&url, &params)?;

        // Encode the query ourselves so it matches what the OAuth signature covered.
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request_url = if query.is_empty() {
            url
        } else {
            format!("{url}?{query}")
        };

        tracing::debug!(path, mode = %self.auth_mode, "GET");
        let response = self
            .http
            .get(&request_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "X API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn resolve_user_id(&self, username: &str) -> Result<String> {
        let path = format!("/users/by/username/{}", percent_encode(username));
        let raw: serde_json::Value = self
            .get(&path, vec![("user.fields".into(), "id".into())])
            .await?;
        let parsed: UserResponse = serde_json::from_value(raw.clone())?;
        parsed
            .data
            .and_then(|d| d.id)
            .ok_or_else(|| ApiError::UserNotFound {
                username: username.to_string(),
                body: raw.to_string(),
            })
    }

    /// Fetch the account's posts from the last `days` days.
    pub async fn fetch_recent_posts(&self, request: &FetchRequest) -> Result<PostsPayload> {
        let start_time = iso_utc_now_minus_days(request.days)?;
        let username = request.identity.username.clone();
        let user_id = match (&request.identity.user_id, &username) {
            (Some(id), _) => id.clone(),
            (None, Some(name)) => self.resolve_user_id(name).await?,
            (None, None) => return Err(ApiError::MissingIdentity),
        };

        let mut fields = vec!["created_at", "public_metrics"];
        if self.auth_mode == AuthMode::OAuth1 {
            fields.push("non_public_metrics");
        }
        let params = vec![
            ("start_time".to_string(), start_time.clone()),
            (
                "max_results".to_string(),
                request.max_results.clamp(5, 100).to_string(),
            ),
            ("tweet.fields".to_string(), fields.join(",")),
        ];

        let response: PostsResponse = self
            .get(&format!("/users/{}/tweets", percent_encode(&user_id)), params)
            .await?;
        tracing::info!(user_id = %user_id, posts = response.data.len(), "fetched recent posts");

        Ok(PostsPayload {
            meta: FetchMeta {
                days: request.days,
                start_time,
                auth_mode: self.auth_mode,
                username,
                user_id,
                post_count: response.data.len(),
            },
            data: response.data,
            raw_meta: response.meta,
        })
    }

    /// Recent public posts per topic. The recent-search endpoint only covers
    /// the last 7 days.
    pub async fn search_topic_posts(
        &self,
        topics: &[String],
        days: u32,
        per_topic_results: u32,
    ) -> Result<TopicResearch> {
        let lookback_days = days.clamp(1, 7);
        let per_topic = per_topic_results.clamp(10, 100);
        let start_time = iso_utc_now_minus_days(lookback_days)?;

        let mut results = BTreeMap::new();
        for topic in topics {
            let Some(query) = topic_query(topic) else {
                continue;
            };
            let params = vec![
                ("query".to_string(), query),
                ("max_results".to_string(), per_topic.to_string()),
                ("start_time".to_string(), start_time.clone()),
                (
                    "tweet.fields".to_string(),
                    "created_at,public_metrics,author_id".to_string(),
                ),
            ];
            let response: PostsResponse = self.get("/tweets/search/recent", params).await?;
            tracing::debug!(topic = %topic, posts = response.data.len(), "topic search");
            results.insert(topic.clone(), response.data);
        }

        Ok(TopicResearch {
            meta: TopicResearchMeta {
                auth_mode: Some(self.auth_mode),
                days: lookback_days,
                start_time,
                per_topic_results: per_topic,
                topic_count: topics.len(),
                note: Some(
                    "Search API recent endpoint is used and then ranked by public engagement."
                        .to_string(),
                ),
                error: None,
            },
            topics: results,
        })
    }
}
