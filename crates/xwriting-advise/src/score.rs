use serde::{Deserialize, Serialize};

use crate::MAX_HOOK_WORDS;

const SHAREABLE_CHARS: usize = 260;
const STRONG: u8 = 8;
const WEAK: u8 = 6;

/// Each dimension is scored out of 10.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftScores {
    pub hook_strength: u8,
    pub specificity: u8,
    pub shareability: u8,
    pub clarity: u8,
}

fn pick(strong: bool) -> u8 {
    if strong {
        STRONG
    } else {
        WEAK
    }
}

pub fn score_draft(draft: &str) -> DraftScores {
    let d = draft.trim();
    let hook_words = d.lines().next().map_or(0, |l| l.split_whitespace().count());

    DraftScores {
        hook_strength: pick(hook_words <= MAX_HOOK_WORDS),
        specificity: pick(d.chars().any(|c| c.is_ascii_digit())),
        shareability: pick(d.chars().count() < SHAREABLE_CHARS),
        // Multiple lines or sentences read clearer than one run-on block.
        clarity: pick(d.contains('\n') || d.contains('.')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_specific_multiline_draft_scores_high() {
        let s = score_draft("I wrote 30 threads in 30 days.\nHere is what worked.");
        assert_eq!(
            s,
            DraftScores {
                hook_strength: 8,
                specificity: 8,
                shareability: 8,
                clarity: 8,
            }
        );
    }

    #[test]
    fn long_vague_run_on_scores_low() {
        let hook = "word ".repeat(15);
        let draft = format!("{hook}{}", "x".repeat(300));
        let s = score_draft(&draft);
        assert_eq!(s.hook_strength, 6);
        assert_eq!(s.specificity, 6);
        assert_eq!(s.shareability, 6);
        assert_eq!(s.clarity, 6);
    }

    #[test]
    fn empty_draft_does_not_panic() {
        let s = score_draft("   ");
        assert_eq!(s.hook_strength, 8);
        assert_eq!(s.clarity, 6);
    }
}
