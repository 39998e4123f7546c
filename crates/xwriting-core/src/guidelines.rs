//! Thread writing guidelines: single source of truth for the advice report
//! and the `guidelines` command.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Writing rules for composing threads, in the order they were captured.
/// Order is preserved when rendered but carries no priority.
pub const THREAD_WRITING_GUIDELINES: [&str; 20] = [
    "Link directly to publicly available hook inspiration.",
    "Use title-style capitalization for thread headers and avoid punctuation at the end of those headers.",
    "Prefer newer, higher-quality source videos or source material over older ones.",
    "End each tweet with a banger line (a hard-hitting 'bar' designed for shareability).",
    "Use clean, consistent spacing between sentences and bullets.",
    "Make content highly specific and actionable; remove generic fluff.",
    "Aim for details the reader cannot easily find elsewhere.",
    "Keep voice original and avoid copy that feels generic or AI-templated.",
    "Go deeper on HOW and WHAT to do, not just high-level claims.",
    "Share practical implementation details (for example, how to monetize or create compelling content).",
    "Be specific with numbers and obsessed with details.",
    "When presenting a step, include both what to do and how to do it.",
    "The more specific the better.",
    "Reference strong proven examples and make each tweet in a thread capable of standing alone.",
    "Pack threads with multiple banger tweets.",
    "Do not copy top tweets verbatim; produce original writing.",
    "Tag relevant people/pages in threads naturally when useful (often 4-6 in a thread).",
    "Diversify examples and lists (do not over-index on one demographic).",
    "Include a clear CTA (follow, reply, bookmark, newsletter/link click).",
    "Provide concrete examples/templates wherever possible (for example, agenda samples or pitch deck examples).",
];

/// Condensed, brand-neutral variant of the thread guidelines.
pub const GENERIC_WRITING_GUIDELINES: [&str; 12] = [
    "Open with a high-contrast hook that earns the next line.",
    "Use title-style capitalization for thread headers; avoid punctuation at the end of headers.",
    "Prefer newer, high-quality source material and examples.",
    "End each post with a punchy bar line designed to be shareable.",
    "Use clean, consistent spacing for readability.",
    "Be highly specific and actionable; avoid generic fluff.",
    "Include concrete how-to details, not just high-level points.",
    "Reference relevant people or brands naturally when useful.",
    "Diversify examples and avoid repetitive perspective bias.",
    "Include a clear CTA (follow, reply, bookmark, or link click).",
    "Use examples/templates whenever possible.",
    "Keep language original and avoid sounding formulaic.",
];

pub fn thread_guidelines() -> &'static [&'static str] {
    &THREAD_WRITING_GUIDELINES
}

pub fn generic_guidelines() -> &'static [&'static str] {
    &GENERIC_WRITING_GUIDELINES
}

/// Which guideline list to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuidelineSet {
    #[default]
    Thread,
    Generic,
}

impl GuidelineSet {
    pub fn guidelines(self) -> &'static [&'static str] {
        match self {
            GuidelineSet::Thread => thread_guidelines(),
            GuidelineSet::Generic => generic_guidelines(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GuidelineSet::Thread => "thread",
            GuidelineSet::Generic => "generic",
        }
    }
}

impl fmt::Display for GuidelineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuidelineSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thread" => Ok(GuidelineSet::Thread),
            "generic" => Ok(GuidelineSet::Generic),
            other => Err(CoreError::UnknownGuidelineSet(other.to_string())),
        }
    }
}

/// Render guidelines as a Markdown checklist, one unchecked item per line.
pub fn render_checklist(guidelines: &[&str]) -> String {
    let mut out = String::with_capacity(guidelines.len() * 96);
    for line in guidelines {
        out.push_str("- [ ] ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
