//! Influencer candidates mined from a brand's post history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brands::BrandIdentity;

/// Engagement counters sampled from a single post.
///
/// This is a one-shot snapshot from the post where the candidate was first
/// encountered; later collaborations with the same account do not update it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    #[serde(default)]
    pub likes: Option<i64>,

    #[serde(default)]
    pub comments: Option<i64>,

    /// View count; falls back to the play count for video posts where the
    /// API reports plays instead of views.
    #[serde(default)]
    pub views: Option<i64>,
}

/// A prospective influencer identified from a brand's post history, pending
/// durable persistence by the caller.
///
/// `platform_user_id` is the primary identity key; `username` (case-folded)
/// is the secondary one. A scrape never emits two candidates sharing either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerCandidate {
    /// Platform-native user id (primary dedup key).
    pub platform_user_id: String,

    /// Handle as returned by the API (dedup is case-insensitive).
    pub username: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub is_verified: Option<bool>,

    /// Follower count, when the payload branch that produced this candidate
    /// carries one. Candidates admitted as the primary author of their own
    /// post have `None` here: the posts API omits follower counts on the
    /// author object.
    #[serde(default)]
    pub follower_count: Option<i64>,

    #[serde(default)]
    pub profile_pic_url: Option<String>,

    /// Shortcode of the post where this candidate was first seen.
    #[serde(default)]
    pub post_code: Option<String>,

    /// Permalink derived from `post_code`.
    #[serde(default)]
    pub post_link: Option<String>,

    /// Engagement of the post where this candidate was first seen.
    #[serde(default)]
    pub engagement: EngagementSnapshot,
}

/// The full result of one scrape invocation, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub brand: BrandIdentity,
    pub candidates: Vec<InfluencerCandidate>,

    /// Pagination cursor to resume from, when the scrape stopped with more
    /// pages available. `None` means the post history was fully drained.
    #[serde(default)]
    pub last_cursor: Option<String>,

    /// How many posts were fetched and scanned for collaborations.
    pub posts_scanned: usize,

    pub scraped_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_snapshot_defaults_to_all_none() {
        let snapshot = EngagementSnapshot::default();
        assert!(snapshot.likes.is_none());
        assert!(snapshot.comments.is_none());
        assert!(snapshot.views.is_none());
    }

    #[test]
    fn candidate_roundtrips_through_json() {
        let candidate = InfluencerCandidate {
            platform_user_id: "111".to_owned(),
            username: "jane_doe".to_owned(),
            full_name: Some("Jane Doe".to_owned()),
            is_verified: Some(true),
            follower_count: Some(5000),
            profile_pic_url: None,
            post_code: Some("Cxyz".to_owned()),
            post_link: Some("https://www.instagram.com/p/Cxyz/".to_owned()),
            engagement: EngagementSnapshot {
                likes: Some(1000),
                comments: Some(50),
                views: None,
            },
        };
        let json = serde_json::to_string(&candidate).unwrap();
        let back: InfluencerCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.platform_user_id, "111");
        assert_eq!(back.engagement.likes, Some(1000));
    }

    #[test]
    fn candidate_deserializes_with_optional_fields_absent() {
        let json = r#"{"platform_user_id":"42","username":"bella"}"#;
        let candidate: InfluencerCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.username, "bella");
        assert!(candidate.follower_count.is_none());
        assert!(candidate.engagement.likes.is_none());
    }
}
