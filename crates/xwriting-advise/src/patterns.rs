use serde::{Deserialize, Serialize};

use crate::ScoredPost;

const QUESTION_OPENERS: [&str; 4] = ["How", "Why", "What", "When"];
const LONG_POST_CHARS: f64 = 220.0;

/// One suggestion per dimension, drawn from what the best posts do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patterns {
    pub hook: String,
    pub specificity: String,
    pub structure: String,
    pub cta: String,
}

impl Default for Patterns {
    fn default() -> Self {
        Patterns {
            hook: "Lead with a direct, high-contrast opening line.".to_string(),
            specificity: "Use concrete details and examples.".to_string(),
            structure: "Use short lines and clear spacing.".to_string(),
            cta: "End with a clear ask (reply/bookmark/follow).".to_string(),
        }
    }
}

pub fn infer_patterns(top_posts: &[ScoredPost]) -> Patterns {
    if top_posts.is_empty() {
        return Patterns::default();
    }

    let half = top_posts.len() / 2;
    let avg_len = top_posts
        .iter()
        .map(|p| p.text.chars().count())
        .sum::<usize>() as f64
        / top_posts.len() as f64;
    let with_number = top_posts
        .iter()
        .filter(|p| p.text.chars().any(|c| c.is_ascii_digit()))
        .count();
    let question_open = top_posts
        .iter()
        .filter(|p| {
            let text = p.text.trim();
            QUESTION_OPENERS.iter().any(|q| text.starts_with(q))
        })
        .count();

    let hook = if question_open >= half {
        "Open with a pointed question hook."
    } else {
        "Use a punchy statement hook."
    };
    let specificity = if with_number >= half {
        "Use numbered specifics (steps, counts, or outcomes)."
    } else {
        "Add specific examples and tactical details."
    };
    let structure = if avg_len > LONG_POST_CHARS {
        "Use mini-sections and line breaks to improve readability."
    } else {
        "Keep spacing clean with short, skimmable lines."
    };

    Patterns {
        hook: hook.to_string(),
        specificity: specificity.to_string(),
        structure: structure.to_string(),
        cta: "Close with a strong, direct CTA.".to_string(),
    }
}
