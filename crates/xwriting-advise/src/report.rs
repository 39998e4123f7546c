use xwriting_core::guidelines::render_checklist;
use xwriting_core::{GuidelineSet, Post, TopicResearch};

use crate::{infer_patterns, rank_posts, rewrite_draft, score_draft};

const TOP_POSTS: usize = 10;
const SNIPPET_CHARS: usize = 80;

/// Everything the advice report is built from.
#[derive(Debug, Clone, Copy)]
pub struct AdviceInput<'a> {
    pub draft: &'a str,
    pub posts: &'a [Post],
    pub topics: &'a [String],
    pub topic_research: Option<&'a TopicResearch>,
    pub account_fetch_error: Option<&'a str>,
    pub guidelines: GuidelineSet,
}

impl<'a> AdviceInput<'a> {
    pub fn new(draft: &'a str, posts: &'a [Post]) -> Self {
        AdviceInput {
            draft,
            posts,
            topics: &[],
            topic_research: None,
            account_fetch_error: None,
            guidelines: GuidelineSet::default(),
        }
    }
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SNIPPET_CHARS {
        let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

/// Render the Markdown advice report.
pub fn generate_advice(input: &AdviceInput<'_>) -> String {
    let top = rank_posts(input.posts, TOP_POSTS);
    let patterns = infer_patterns(&top);
    let scores = score_draft(input.draft);
    let rewritten = rewrite_draft(input.draft, &patterns);

    let top_note = match top.first() {
        Some(t) => format!(
            "Top post pattern from your data: {} impressions, {} likes, {} reposts.",
            t.impressions, t.likes, t.reposts
        ),
        None => "No top posts available.".to_string(),
    };

    let mut lines: Vec<String> = vec![
        "## Score Snapshot".into(),
        format!("- Hook Strength: {}/10", scores.hook_strength),
        format!("- Specificity: {}/10", scores.specificity),
        format!("- Shareability: {}/10", scores.shareability),
        format!("- Clarity: {}/10", scores.clarity),
        String::new(),
        "## What Works".into(),
        "- The draft has a clear core message.".into(),
        String::new(),
        "## Improve Next".into(),
        format!("- Hook: {}", patterns.hook),
        format!("- Specificity: {}", patterns.specificity),
        format!("- Structure: {}", patterns.structure),
        format!("- CTA: {}", patterns.cta),
        String::new(),
        "## Rewritten Draft".into(),
        rewritten,
        String::new(),
        "## Why These Changes".into(),
        format!("- {top_note}"),
    ];
    if let Some(err) = input.account_fetch_error {
        lines.push(format!("- Account posts unavailable: {err}"));
    }
    lines.push("- Applied winning patterns to hook, specificity, structure, and CTA.".into());

    if !input.topics.is_empty() {
        lines.push(String::new());
        lines.push("## Topic Research".into());
        lines.push(format!("- Topics: {}", input.topics.join(", ")));
        push_topic_research(&mut lines, input.topics, input.topic_research);
    }

    lines.push(String::new());
    lines.push("## Guideline Checklist".into());
    lines.push(render_checklist(input.guidelines.guidelines()).trim_end().to_string());

    lines.join("\n")
}

fn push_topic_research(lines: &mut Vec<String>, topics: &[String], research: Option<&TopicResearch>) {
    let Some(research) = research else {
        lines.push("- Topic research skipped.".into());
        return;
    };
    if let Some(err) = &research.meta.error {
        lines.push(format!("- Topic research unavailable: {err}"));
        return;
    }
    for topic in topics {
        let best = research
            .topics
            .get(topic)
            .and_then(|posts| rank_posts(posts, 1).into_iter().next());
        match best {
            Some(p) => lines.push(format!(
                "- {topic}: top recent post ({} likes, {} reposts): \"{}\"",
                p.likes,
                p.reposts,
                snippet(&p.text)
            )),
            None => lines.push(format!("- {topic}: no recent posts found.")),
        }
    }
}
