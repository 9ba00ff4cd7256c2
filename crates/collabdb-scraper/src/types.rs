//! Wire types for the upstream paged-posts API.
//!
//! ## Observed response shape
//!
//! A 200 response wraps everything in a `result` envelope:
//!
//! ```text
//! { "result": { "edges": [ { "node": { ... } } ],
//!               "page_info": { "has_next_page": true, "end_cursor": "..." } } }
//! ```
//!
//! ### User ids
//! The API serves `pk` as either a JSON number or a string depending on the
//! endpoint version, and some user objects carry `id` instead of `pk`.
//! Both fields are coerced to `String` on deserialization; callers should go
//! through [`ApiUser::user_id`] which prefers `pk` and falls back to `id`.
//!
//! ### Engagement counters
//! `like_count` / `comment_count` / `view_count` may each be absent.
//! Video posts sometimes report `play_count` instead of `view_count`.
//!
//! ### `coauthor_producers`
//! Present only on posts with collaboration tags; `#[serde(default)]`
//! handles the common absent case.
//!
//! ### `owner` vs `user`
//! `user` is the primary author and is always present. `owner` shows up on
//! some payload variants (e.g. posts surfaced on a profile the author does
//! not own) and carries a reduced field set.

use serde::{Deserialize, Deserializer};

/// Top-level 200 response body.
#[derive(Debug, Deserialize)]
pub struct PostsResponse {
    /// Envelope; absent or null when the account has no posts (treated as
    /// end of pagination, not an error).
    #[serde(default)]
    pub result: Option<PostsResult>,
}

/// The `result` envelope: one page of posts plus pagination state.
#[derive(Debug, Deserialize)]
pub struct PostsResult {
    #[serde(default)]
    pub edges: Vec<PostEdge>,

    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

/// Cursor-based pagination state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,

    /// Opaque cursor to resume from. May be null or blank on the last page
    /// even when `has_next_page` was never flipped to false.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One entry of `result.edges`.
#[derive(Debug, Deserialize)]
pub struct PostEdge {
    pub node: PostNode,
}

/// A single post with its authorship graph and engagement counters.
#[derive(Debug, Deserialize)]
pub struct PostNode {
    /// URL shortcode of the post (used to build permalinks).
    #[serde(default)]
    pub code: Option<String>,

    /// Platform-internal post id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub pk: Option<String>,

    /// Primary author of the post.
    #[serde(default)]
    pub user: Option<ApiUser>,

    /// Owning account, when the payload variant carries one.
    #[serde(default)]
    pub owner: Option<ApiUser>,

    /// Accounts credited as joint creators via collaboration tags.
    #[serde(default)]
    pub coauthor_producers: Vec<ApiUser>,

    #[serde(default)]
    pub like_count: Option<i64>,

    #[serde(default)]
    pub comment_count: Option<i64>,

    #[serde(default)]
    pub view_count: Option<i64>,

    /// Play count for video posts; used as the view count when
    /// `view_count` is absent.
    #[serde(default)]
    pub play_count: Option<i64>,
}

impl PostNode {
    /// View count with the video-post fallback to `play_count`.
    ///
    /// The fallback triggers only when `view_count` is absent; a literal
    /// zero is kept as-is.
    #[must_use]
    pub fn views(&self) -> Option<i64> {
        self.view_count.or(self.play_count)
    }

    /// Permalink for this post, when it has a shortcode.
    #[must_use]
    pub fn permalink(&self) -> Option<String> {
        self.code
            .as_deref()
            .map(|code| format!("https://www.instagram.com/p/{code}/"))
    }
}

/// A user object as embedded in post payloads.
///
/// Field availability varies by position: coauthor entries carry
/// `follower_count`, the primary `user` object does not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub pk: Option<String>,

    /// Alternative id field on some payload variants.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub is_verified: Option<bool>,

    #[serde(default)]
    pub follower_count: Option<i64>,

    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl ApiUser {
    /// Platform user id, preferring `pk` over `id`.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.pk.as_deref().or(self.id.as_deref())
    }

    /// Username, defaulting to the empty string when absent.
    #[must_use]
    pub fn username_or_empty(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// Deserializes a field that may be a JSON string, number, or null into
/// `Option<String>`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
