//! Brand identity as resolved from a scraped post history.

use serde::{Deserialize, Serialize};

/// The brand account a scrape was run against, with whatever profile fields
/// could be recovered from the fetched posts.
///
/// Only `username` is guaranteed: when the brand never appears as the
/// primary author of the first fetched post, the remaining fields stay
/// `None` and the identity is just the handle the caller asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandIdentity {
    /// The brand's handle on the platform (case preserved as returned by
    /// the API, or as supplied by the caller when unresolved).
    pub username: String,

    /// Display name, when the brand authored the first fetched post.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Platform-native user id.
    #[serde(default)]
    pub platform_user_id: Option<String>,

    /// Verified badge, when the brand authored the first fetched post.
    #[serde(default)]
    pub is_verified: Option<bool>,
}

impl BrandIdentity {
    /// An identity carrying only the handle, used when nothing could be
    /// resolved from the post history.
    #[must_use]
    pub fn unresolved(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            full_name: None,
            platform_user_id: None,
            is_verified: None,
        }
    }
}
