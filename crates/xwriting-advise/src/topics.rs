//! Topic extraction for recent-search research.

use std::collections::HashMap;

const MIN_WORD_CHARS: usize = 4;

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "also", "always", "been", "before", "being", "below",
    "both", "could", "does", "doing", "done", "down", "each", "even", "every", "from", "gets",
    "going", "have", "having", "here", "into", "just", "know", "like", "make", "many", "more",
    "most", "much", "need", "never", "only", "other", "over", "really", "same", "should", "some",
    "such", "take", "than", "that", "their", "them", "then", "there", "these", "they", "thing",
    "things", "think", "this", "those", "thread", "through", "tweet", "tweets", "under", "until",
    "very", "want", "well", "were", "what", "when", "where", "which", "while", "will", "with",
    "would", "your", "yours",
];

/// Topics for a draft: hashtags first in order of appearance, then content
/// words ranked by frequency (ties by first appearance). Lowercased and
/// deduplicated.
pub fn extract_topics(draft: &str, max_topics: usize) -> Vec<String> {
    if max_topics == 0 {
        return vec![];
    }

    let mut topics: Vec<String> = Vec::new();
    for token in draft.split_whitespace() {
        let Some(tag) = token.strip_prefix('#') else {
            continue;
        };
        let tag: String = tag
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect::<String>()
            .to_lowercase();
        if !tag.is_empty() && !topics.contains(&tag) {
            topics.push(tag);
        }
    }

    // word -> (count, first appearance)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, word) in draft.split(|c: char| !c.is_alphanumeric()).enumerate() {
        let word = word.to_lowercase();
        if word.chars().count() < MIN_WORD_CHARS
            || word.chars().all(|c| c.is_ascii_digit())
            || STOPWORDS.contains(&word.as_str())
            || topics.contains(&word)
        {
            continue;
        }
        counts.entry(word).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, ia)), (_, (cb, ib))| cb.cmp(ca).then(ia.cmp(ib)));

    topics.extend(ranked.into_iter().map(|(w, _)| w));
    topics.truncate(max_topics);
    tracing::debug!(?topics, "extracted topics");
    topics
}

/// Split a comma-separated `--topics` value, dropping blanks.
pub fn parse_topic_overrides(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
