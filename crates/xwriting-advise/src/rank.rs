use serde::{Deserialize, Serialize};
use xwriting_core::Post;

const IMPRESSION_WEIGHT: f64 = 1.0;
const LIKE_WEIGHT: f64 = 20.0;
const REPOST_WEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredPost {
    pub text: String,
    pub impressions: u64,
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    pub score: f64,
}

impl ScoredPost {
    pub fn from_post(post: &Post) -> Self {
        let public = post.public_metrics.unwrap_or_default();
        // Private impressions are only visible to the author; without them use the public count.
        let impressions = post
            .non_public_metrics
            .map_or(public.impression_count, |m| m.impression_count);

        let score = impressions as f64 * IMPRESSION_WEIGHT
            + public.like_count as f64 * LIKE_WEIGHT
            + public.retweet_count as f64 * REPOST_WEIGHT;

        ScoredPost {
            text: post.text.trim().to_string(),
            impressions,
            likes: public.like_count,
            reposts: public.retweet_count,
            replies: public.reply_count,
            score,
        }
    }
}

/// Score every post and return the best `top_n`, highest first. Ties keep
/// their input order.
pub fn rank_posts(posts: &[Post], top_n: usize) -> Vec<ScoredPost> {
    let mut scored: Vec<ScoredPost> = posts.iter().map(ScoredPost::from_post).collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}
