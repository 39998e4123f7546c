pub mod patterns;
pub mod rank;
pub mod report;
pub mod rewrite;
pub mod score;
pub mod topics;

pub use patterns::{infer_patterns, Patterns};
pub use rank::{rank_posts, ScoredPost};
pub use report::{generate_advice, AdviceInput};
pub use rewrite::rewrite_draft;
pub use score::{score_draft, DraftScores};
pub use topics::{extract_topics, parse_topic_overrides};

/// Hooks longer than this many words get rewritten or scored down.
pub(crate) const MAX_HOOK_WORDS: usize = 14;
