//! Username canonicalization and fuzzy-equality matching.
//!
//! Brands run sibling accounts (`mamaearth.in`, `mamaearth_global`,
//! `mynykaa_official`) that must all collapse to one identity when the
//! collaboration graph is mined. [`UsernameMatcher`] first strips the noise
//! affixes those variants are built from, then falls back to a
//! character-level similarity ratio for spelling variations the catalogue
//! cannot anticipate.
//!
//! The affix catalogue and threshold are plain fields so callers can tune
//! them per deployment; the defaults cover the variants observed in
//! production scrapes.

/// TLD-like suffixes stripped from handles such as `brand.in` or `brand.com`.
const DEFAULT_TLDS: &[&str] = &[
    ".in", ".com", ".co", ".io", ".net", ".org", ".uk", ".us", ".au", ".ca",
];

/// Affixes stripped from the end of a handle.
const DEFAULT_SUFFIXES: &[&str] = &[
    "_global",
    "_official",
    "_india",
    "_world",
    "_international",
    "_verified",
    "_brand",
    "_store",
    "_shop",
    "_officialpage",
];

/// Affixes stripped from the start of a handle.
const DEFAULT_PREFIXES: &[&str] = &[
    "official_",
    "global_",
    "india_",
    "world_",
    "brand_",
    "officialpage_",
];

/// Affixes stripped from either end.
const DEFAULT_BIDIRECTIONAL: &[&str] = &["_page", "_account", "_insta", "_ig"];

/// Normalized forms shorter than this never trigger the substring rule;
/// tiny fragments would make everything contain everything.
const MIN_SUBSTRING_LEN: usize = 5;

/// Fuzzy username matcher built on affix normalization.
#[derive(Debug, Clone)]
pub struct UsernameMatcher {
    /// Minimum similarity ratio at which two usernames count as the same
    /// underlying account.
    pub threshold: f64,
    pub tlds: Vec<String>,
    pub suffixes: Vec<String>,
    pub prefixes: Vec<String>,
    pub bidirectional: Vec<String>,
}

impl Default for UsernameMatcher {
    fn default() -> Self {
        let to_owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
        Self {
            threshold: 0.85,
            tlds: to_owned(DEFAULT_TLDS),
            suffixes: to_owned(DEFAULT_SUFFIXES),
            prefixes: to_owned(DEFAULT_PREFIXES),
            bidirectional: to_owned(DEFAULT_BIDIRECTIONAL),
        }
    }
}

impl UsernameMatcher {
    /// The default catalogue with a custom similarity threshold.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Canonicalizes a username: lowercase, one trailing TLD suffix
    /// stripped, one ordered pass over the affix catalogue (each affix
    /// stripped at most once — deliberately not iterated to a fixed
    /// point), then leading/trailing `_`/`-` trimmed.
    #[must_use]
    pub fn normalize(&self, username: &str) -> String {
        let mut normalized = username.to_lowercase();

        for tld in &self.tlds {
            if let Some(stripped) = normalized.strip_suffix(tld.as_str()) {
                normalized = stripped.to_owned();
                break;
            }
        }

        for suffix in &self.suffixes {
            if let Some(stripped) = normalized.strip_suffix(suffix.as_str()) {
                normalized = stripped.to_owned();
            }
        }
        for prefix in &self.prefixes {
            if let Some(stripped) = normalized.strip_prefix(prefix.as_str()) {
                normalized = stripped.to_owned();
            }
        }
        for affix in &self.bidirectional {
            if let Some(stripped) = normalized.strip_suffix(affix.as_str()) {
                normalized = stripped.to_owned();
            }
            if let Some(stripped) = normalized.strip_prefix(affix.as_str()) {
                normalized = stripped.to_owned();
            }
        }

        normalized
            .trim_matches(|c| c == '_' || c == '-')
            .to_owned()
    }

    /// Whether two usernames likely refer to the same underlying account.
    ///
    /// Both are normalized first. Equal non-empty normalized forms match;
    /// otherwise the similarity ratio must reach the threshold, or — for
    /// normalized forms of at least five characters — one must be a
    /// substring of the other (heavy truncation/expansion the ratio
    /// undervalues). Symmetric in its arguments.
    #[must_use]
    pub fn is_similar(&self, a: &str, b: &str) -> bool {
        let norm_a = self.normalize(a);
        let norm_b = self.normalize(b);

        if norm_a == norm_b && !norm_a.is_empty() {
            return true;
        }

        let contains = norm_a.len() >= MIN_SUBSTRING_LEN
            && norm_b.len() >= MIN_SUBSTRING_LEN
            && (norm_a.contains(&norm_b) || norm_b.contains(&norm_a));

        similarity_ratio(&norm_a, &norm_b) >= self.threshold || contains
    }
}

/// Character-level similarity ratio `2*M / (len(a) + len(b))`, where `M` is
/// the total size of the greedy longest-matching-block alignment: take the
/// longest common contiguous block (ties to the earliest position), then
/// recurse on the pieces to its left and right.
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = 2.0 * matching_total(&a, &b) as f64 / total as f64;
    ratio
}

/// Total matched characters of the greedy longest-block alignment of `a`
/// and `b`.
fn matching_total(a: &[char], b: &[char]) -> usize {
    let (block_a, block_b, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_total(&a[..block_a], &b[..block_b])
        + matching_total(&a[block_a + size..], &b[block_b + size..])
}

/// Finds the longest common contiguous block of `a` and `b`, returning its
/// start in each plus its length. Ties resolve to the earliest start in
/// `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut curr = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                curr[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = curr;
    }
    best
}

#[cfg(test)]
#[path = "similarity_test.rs"]
mod tests;
