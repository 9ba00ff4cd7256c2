//! Brand identity resolution and influencer extraction from fetched posts.
//!
//! Extraction mines the authorship graph of each post (primary author,
//! owner, coauthor tags) and classifies it as brand-authored, influencer-
//! authored, or irrelevant. Candidates are deduplicated through two
//! parallel keys — platform user id and case-folded username — so that the
//! same account reappearing under a different spelling or the same handle
//! reappearing under a different id never produces two entries. The first
//! occurrence always wins, and output preserves first-encountered order.

use std::collections::HashSet;

use collabdb_core::{BrandIdentity, EngagementSnapshot, InfluencerCandidate};

use crate::similarity::UsernameMatcher;
use crate::types::{ApiUser, PostNode};

/// Resolves the brand's profile fields from the first fetched post.
///
/// The primary author matching `brand_username` (case-insensitive) yields
/// the full field set. An `owner` match yields only the username and
/// platform id — the owner object does not reliably carry the rest, and
/// that reduced shape is preserved as-is. Anything else falls back to an
/// identity holding just the requested handle.
///
/// Known limitation: on a resumed scrape the "first post" is wherever the
/// previous run stopped, not the brand's actual latest post, so resolution
/// can degrade to the fallback even for an active brand.
#[must_use]
pub fn resolve_brand_identity(posts: &[PostNode], brand_username: &str) -> BrandIdentity {
    let Some(first) = posts.first() else {
        return BrandIdentity::unresolved(brand_username);
    };

    if let Some(user) = &first.user {
        if user.username_or_empty().eq_ignore_ascii_case(brand_username) {
            return BrandIdentity {
                username: user
                    .username
                    .clone()
                    .unwrap_or_else(|| brand_username.to_owned()),
                full_name: user.full_name.clone(),
                platform_user_id: user.user_id().map(str::to_owned),
                is_verified: user.is_verified,
            };
        }
    }

    if let Some(owner) = &first.owner {
        if owner.username_or_empty().eq_ignore_ascii_case(brand_username) {
            return BrandIdentity {
                username: owner
                    .username
                    .clone()
                    .unwrap_or_else(|| brand_username.to_owned()),
                full_name: None,
                platform_user_id: owner.user_id().map(str::to_owned),
                is_verified: None,
            };
        }
    }

    BrandIdentity::unresolved(brand_username)
}

/// Extracts the deduplicated influencer candidates from `posts`.
///
/// Per post:
/// - **Brand-authored** (primary author or owner is the brand): every
///   coauthor tag that is not the brand itself or a similar sibling handle
///   is admitted, carrying its own follower count and the post's
///   engagement.
/// - **Influencer-authored** (the brand appears among the coauthors): the
///   primary author is admitted with `follower_count` unset (the author
///   object in this payload shape does not carry one), and every other
///   non-brand coauthor is admitted with its own follower count.
/// - Posts matching neither pattern contribute nothing.
///
/// Usernames in `exclude_usernames` (case-insensitive, trimmed) are skipped
/// at admission and filtered once more from the final list.
#[must_use]
pub fn extract_influencers(
    posts: &[PostNode],
    brand_username: &str,
    exclude_usernames: &[String],
    matcher: &UsernameMatcher,
) -> Vec<InfluencerCandidate> {
    let exclude: HashSet<String> = exclude_usernames
        .iter()
        .map(|u| u.trim().to_lowercase())
        .collect();

    let mut sink = DedupSink::new(exclude);
    let is_brand = |username: &str| username.eq_ignore_ascii_case(brand_username);

    for post in posts {
        let author = post.user.as_ref();
        let author_is_brand = author.is_some_and(|u| is_brand(u.username_or_empty()));
        let owner_is_brand = post
            .owner
            .as_ref()
            .is_some_and(|o| is_brand(o.username_or_empty()));

        if author_is_brand || owner_is_brand {
            // Brand posted; collaborators are in the coauthor tags.
            for coauthor in &post.coauthor_producers {
                let username = coauthor.username_or_empty();
                if is_brand(username) || matcher.is_similar(username, brand_username) {
                    tracing::info!(
                        coauthor = username,
                        brand = brand_username,
                        "skipping brand-equivalent coauthor"
                    );
                    continue;
                }
                sink.admit(candidate_from_user(coauthor, post, coauthor.follower_count));
            }
            continue;
        }

        // Brand not the author; relevant only when the brand is tagged as a
        // coauthor, in which case the author collaborated with the brand.
        let brand_in_coauthors = post.coauthor_producers.iter().any(|c| {
            is_brand(c.username_or_empty())
                || matcher.is_similar(c.username_or_empty(), brand_username)
        });
        if !brand_in_coauthors {
            continue;
        }

        if let Some(author) = author {
            let username = author.username_or_empty();
            if !is_brand(username) && !matcher.is_similar(username, brand_username) {
                // Follower count is absent on the author object here.
                sink.admit(candidate_from_user(author, post, None));
            }
        }

        // Other coauthors on the same post collaborated with the brand too.
        for coauthor in &post.coauthor_producers {
            let username = coauthor.username_or_empty();
            if is_brand(username) || matcher.is_similar(username, brand_username) {
                continue;
            }
            sink.admit(candidate_from_user(coauthor, post, coauthor.follower_count));
        }
    }

    sink.into_candidates()
}

/// Builds a candidate from a user object plus the post it appeared on.
/// Returns `None` when the user carries no platform id at all — such an
/// entry could never be deduplicated or persisted.
fn candidate_from_user(
    user: &ApiUser,
    post: &PostNode,
    follower_count: Option<i64>,
) -> Option<InfluencerCandidate> {
    let Some(platform_user_id) = user.user_id() else {
        tracing::warn!(
            username = user.username_or_empty(),
            "skipping user without a platform id"
        );
        return None;
    };

    Some(InfluencerCandidate {
        platform_user_id: platform_user_id.to_owned(),
        username: user.username.clone().unwrap_or_default(),
        full_name: user.full_name.clone(),
        is_verified: user.is_verified,
        follower_count,
        profile_pic_url: user.profile_pic_url.clone(),
        post_code: post.code.clone(),
        post_link: post.permalink(),
        engagement: EngagementSnapshot {
            likes: post.like_count,
            comments: post.comment_count,
            views: post.views(),
        },
    })
}

/// Insertion-ordered candidate collection with two-key dedup.
struct DedupSink {
    candidates: Vec<InfluencerCandidate>,
    seen_ids: HashSet<String>,
    seen_usernames: HashSet<String>,
    exclude: HashSet<String>,
}

impl DedupSink {
    fn new(exclude: HashSet<String>) -> Self {
        Self {
            candidates: Vec::new(),
            seen_ids: HashSet::new(),
            seen_usernames: HashSet::new(),
            exclude,
        }
    }

    /// Admits a candidate unless it is excluded or a duplicate on either
    /// key. First occurrence wins; later sightings never update fields.
    fn admit(&mut self, candidate: Option<InfluencerCandidate>) {
        let Some(candidate) = candidate else { return };
        let username_key = candidate.username.trim().to_lowercase();

        if self.exclude.contains(&username_key) {
            tracing::info!(username = candidate.username.as_str(), "skipping excluded username");
            return;
        }
        if self.seen_ids.contains(&candidate.platform_user_id)
            || self.seen_usernames.contains(&username_key)
        {
            return;
        }

        self.seen_ids.insert(candidate.platform_user_id.clone());
        self.seen_usernames.insert(username_key);
        self.candidates.push(candidate);
    }

    /// Final list, with a second defensive pass over the exclusion set.
    fn into_candidates(self) -> Vec<InfluencerCandidate> {
        let exclude = self.exclude;
        self.candidates
            .into_iter()
            .filter(|c| !exclude.contains(&c.username.trim().to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
