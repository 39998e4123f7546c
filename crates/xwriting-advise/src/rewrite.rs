use crate::{Patterns, MAX_HOOK_WORDS};

const FALLBACK_HOOK: &str = "Most founders are one edit away from a viral post";
const CLOSING_CTA: &str = "If this helped, reply and I will share the exact checklist.";
const MAX_BODY_LINES: usize = 4;

/// Tighten a draft: short hook, at most four body lines, closing CTA.
///
/// `_patterns` is accepted so callers can pass what was inferred; the
/// rewrite itself is currently pattern-independent.
pub fn rewrite_draft(draft: &str, _patterns: &Patterns) -> String {
    let lines: Vec<&str> = draft
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let Some((&first, body)) = lines.split_first() else {
        return draft.to_string();
    };

    let hook = if first.split_whitespace().count() > MAX_HOOK_WORDS {
        FALLBACK_HOOK
    } else {
        first
    };

    let mut out: Vec<&str> = vec![hook, ""];
    out.extend(body.iter().take(MAX_BODY_LINES));
    if !body.is_empty() {
        out.push("");
    }
    out.push(CLOSING_CTA);
    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_hook_and_caps_body() {
        let draft = "Short hook\n\n a\nb\nc\nd\ne\n";
        let out = rewrite_draft(draft, &Patterns::default());
        assert_eq!(
            out,
            "Short hook\n\na\nb\nc\nd\n\nIf this helped, reply and I will share the exact checklist."
        );
    }

    #[test]
    fn replaces_long_hook() {
        let draft = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen";
        let out = rewrite_draft(draft, &Patterns::default());
        assert_eq!(
            out,
            "Most founders are one edit away from a viral post\n\nIf this helped, reply and I will share the exact checklist."
        );
    }

    #[test]
    fn blank_draft_returned_unchanged() {
        assert_eq!(rewrite_draft("  \n ", &Patterns::default()), "  \n ");
    }
}
