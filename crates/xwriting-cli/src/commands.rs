//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use xwriting_advise::{extract_topics, generate_advice, parse_topic_overrides, AdviceInput};
use xwriting_api::{iso_utc_now_minus_days, ApiError, FetchRequest, XClient};
use xwriting_core::env::{default_env_candidates, load_env_files};
use xwriting_core::{Credentials, GuidelineSet, Identity, TopicResearch};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch recent posts
    Fetch(FetchArgs),
    /// Generate writing suggestions
    Advise(AdviseArgs),
    /// Print the writing guidelines
    Guidelines {
        /// Which list to print: thread or generic
        #[arg(long, default_value = "thread")]
        set: GuidelineSet,
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct EnvArgs {
    /// Optional .env file(s) to load. Can be passed multiple times.
    #[arg(long = "env-file")]
    env_file: Vec<PathBuf>,
}

#[derive(Args)]
pub struct AccountArgs {
    /// Lookback window in days
    #[arg(long, default_value_t = 30)]
    days: u32,
    /// Maximum posts to request (5-100)
    #[arg(long, default_value_t = 100)]
    max_results: u32,
    /// Account username (defaults to X_USERNAME)
    #[arg(long)]
    username: Option<String>,
    /// Account id (defaults to X_USER_ID)
    #[arg(long)]
    user_id: Option<String>,
}

impl AccountArgs {
    fn request(&self) -> FetchRequest {
        let explicit = Identity {
            username: self.username.clone(),
            user_id: self.user_id.clone(),
        };
        FetchRequest {
            days: self.days,
            max_results: self.max_results,
            identity: explicit.or(Identity::from_env()),
        }
    }
}

#[derive(Args)]
pub struct FetchArgs {
    #[command(flatten)]
    account: AccountArgs,
    /// Write the payload to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Only print the computed start time
    #[arg(long)]
    print_start_time: bool,
    #[command(flatten)]
    env: EnvArgs,
}

#[derive(Args)]
pub struct AdviseArgs {
    /// Draft text
    #[arg(long)]
    draft: Option<String>,
    /// Read the draft from a file
    #[arg(long)]
    draft_file: Option<PathBuf>,
    /// Previously fetched posts (skips the account fetch)
    #[arg(long)]
    posts: Option<PathBuf>,
    #[command(flatten)]
    account: AccountArgs,
    /// Comma-separated topic overrides
    #[arg(long)]
    topics: Option<String>,
    /// Max extracted topics from draft
    #[arg(long, default_value_t = 5)]
    max_topics: usize,
    /// Lookback days for topic research
    #[arg(long, default_value_t = 7)]
    topic_days: u32,
    /// Per-topic X search result cap
    #[arg(long, default_value_t = 25)]
    topic_max_results: u32,
    /// Skip topic research
    #[arg(long)]
    no_topic_research: bool,
    /// Guideline list for the checklist: thread or generic
    #[arg(long, default_value = "thread")]
    guidelines: GuidelineSet,
    #[command(flatten)]
    env: EnvArgs,
}

/// Handle the CLI command
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Fetch(args) => {
            bootstrap_env(&args.env)?;
            fetch(args).await
        }
        Commands::Advise(args) => {
            bootstrap_env(&args.env)?;
            advise(args).await
        }
        Commands::Guidelines { set, json } => {
            println!("{}", render_guidelines(set, json)?);
            Ok(())
        }
    }
}

/// Explicit files first so they win over the defaults.
fn bootstrap_env(args: &EnvArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let mut candidates = args.env_file.clone();
    candidates.extend(default_env_candidates(&cwd));
    let loaded = load_env_files(&candidates);
    tracing::debug!(?loaded, "env files loaded");
    Ok(())
}

fn client() -> std::result::Result<XClient, ApiError> {
    XClient::new(Credentials::from_env())
}

async fn fetch(args: FetchArgs) -> Result<()> {
    if args.print_start_time {
        println!("{}", iso_utc_now_minus_days(args.account.days)?);
        return Ok(());
    }

    let payload = client()?.fetch_recent_posts(&args.account.request()).await?;
    match args.out {
        Some(out) => {
            xwriting_core::write_posts(&out, &payload)
                .with_context(|| format!("write {}", out.display()))?;
            println!("Wrote {} posts to {}", payload.meta.post_count, out.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&payload)?),
    }
    Ok(())
}

async fn advise(args: AdviseArgs) -> Result<()> {
    let draft = read_draft(args.draft.as_deref(), args.draft_file.as_deref())?;

    let mut account_fetch_error = None;
    let posts = match &args.posts {
        Some(path) => xwriting_core::read_posts(path)
            .with_context(|| format!("read posts from {}", path.display()))?,
        None => {
            let fetched = match client() {
                Ok(c) => c.fetch_recent_posts(&args.account.request()).await,
                Err(e) => Err(e),
            };
            match fetched {
                Ok(payload) => payload.data,
                Err(e) => {
                    tracing::warn!(error = %e, "account fetch failed; advising without post data");
                    account_fetch_error = Some(e.to_string());
                    vec![]
                }
            }
        }
    };

    let topics = resolve_topics(args.topics.as_deref(), &draft, args.max_topics);

    let topic_research = if args.no_topic_research || topics.is_empty() {
        None
    } else {
        let searched = match client() {
            Ok(c) => {
                c.search_topic_posts(&topics, args.topic_days, args.topic_max_results)
                    .await
            }
            Err(e) => Err(e),
        };
        Some(searched.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "topic research failed");
            TopicResearch::failed(e.to_string())
        }))
    };

    let input = AdviceInput {
        draft: &draft,
        posts: &posts,
        topics: &topics,
        topic_research: topic_research.as_ref(),
        account_fetch_error: account_fetch_error.as_deref(),
        guidelines: args.guidelines,
    };
    println!("{}", generate_advice(&input));
    Ok(())
}

fn read_draft(draft: Option<&str>, draft_file: Option<&Path>) -> Result<String> {
    if let Some(text) = draft.filter(|t| !t.is_empty()) {
        return Ok(text.to_string());
    }
    if let Some(path) = draft_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("read draft from {}", path.display()));
    }
    bail!("Provide --draft or --draft-file")
}

/// A blank `--topics` counts as absent and falls back to extraction.
fn resolve_topics(overrides: Option<&str>, draft: &str, max_topics: usize) -> Vec<String> {
    match overrides.filter(|t| !t.trim().is_empty()) {
        Some(raw) => parse_topic_overrides(raw),
        None => extract_topics(draft, max_topics),
    }
}

fn render_guidelines(set: GuidelineSet, json: bool) -> Result<String> {
    let list = set.guidelines();
    if json {
        return Ok(serde_json::to_string_pretty(list)?);
    }
    Ok(list
        .iter()
        .enumerate()
        .map(|(i, g)| format!("{}. {}", i + 1, g))
        .collect::<Vec<_>>()
        .join("\n"))
}
