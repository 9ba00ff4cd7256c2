use super::*;

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_lowercases() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("MamaEarth"), "mamaearth");
}

#[test]
fn normalize_strips_trailing_tld() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("brand.in"), "brand");
    assert_eq!(matcher.normalize("brand.com"), "brand");
    assert_eq!(matcher.normalize("brand.co"), "brand");
}

#[test]
fn normalize_strips_only_one_tld() {
    let matcher = UsernameMatcher::default();
    // ".in" strips first and the pass stops; ".co" is left in place.
    assert_eq!(matcher.normalize("brand.co.in"), "brand.co");
}

#[test]
fn normalize_strips_account_type_suffix() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("brand_official"), "brand");
    assert_eq!(matcher.normalize("mamaearth_global"), "mamaearth");
    assert_eq!(matcher.normalize("acme_store"), "acme");
}

#[test]
fn normalize_strips_prefix() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("official_acme"), "acme");
    assert_eq!(matcher.normalize("india_acme"), "acme");
}

#[test]
fn normalize_strips_bidirectional_affixes() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("acme_page"), "acme");
    // "_insta" strips as a prefix, then the trim drops the leading "_".
    assert_eq!(matcher.normalize("_insta_acme"), "acme");
    assert_eq!(matcher.normalize("acme_ig"), "acme");
}

#[test]
fn normalize_is_single_pass_over_the_catalogue() {
    let matcher = UsernameMatcher::default();
    // "_official" is stripped exactly once; the pass does not loop back.
    assert_eq!(
        matcher.normalize("acme_official_official"),
        "acme_official"
    );
    // Distinct catalogue entries may still each fire once within the pass:
    // the "_official" suffix strip exposes the "brand_" prefix.
    assert_eq!(matcher.normalize("brand_official_official"), "official");
}

#[test]
fn normalize_combines_tld_and_affix_stripping() {
    let matcher = UsernameMatcher::default();
    // "mynykaa_official.in" -> TLD -> "mynykaa_official" -> suffix -> "mynykaa"
    assert_eq!(matcher.normalize("Mynykaa_Official.in"), "mynykaa");
}

#[test]
fn normalize_trims_leading_and_trailing_separators() {
    let matcher = UsernameMatcher::default();
    assert_eq!(matcher.normalize("-acme_"), "acme");
    assert_eq!(matcher.normalize("__acme--"), "acme");
}

#[test]
fn normalize_is_deterministic() {
    let matcher = UsernameMatcher::default();
    let first = matcher.normalize("official_mamaearth_global.in");
    let second = matcher.normalize("official_mamaearth_global.in");
    assert_eq!(first, second);
}

// -----------------------------------------------------------------------
// similarity_ratio
// -----------------------------------------------------------------------

#[test]
fn ratio_of_identical_strings_is_one() {
    assert!((similarity_ratio("acme", "acme") - 1.0).abs() < f64::EPSILON);
}

#[test]
fn ratio_of_disjoint_strings_is_zero() {
    assert!(similarity_ratio("abc", "xyz").abs() < f64::EPSILON);
}

#[test]
fn ratio_counts_greedy_longest_blocks() {
    // Longest block "abc" (3 chars), right remainder "d" vs "e" contributes
    // nothing: 2*3 / 8 = 0.75.
    assert!((similarity_ratio("abcd", "abce") - 0.75).abs() < 1e-9);
}

#[test]
fn ratio_handles_transposed_halves() {
    // Longest block is one half; the other half cannot match across the
    // recursion boundary: 2*3 / 12 = 0.5.
    assert!((similarity_ratio("abcdef", "defabc") - 0.5).abs() < 1e-9);
}

// -----------------------------------------------------------------------
// is_similar
// -----------------------------------------------------------------------

#[test]
fn sibling_brand_accounts_are_similar() {
    let matcher = UsernameMatcher::default();
    assert!(matcher.is_similar("mamaearth.in", "mamaearth_global"));
    assert!(matcher.is_similar("acme", "acme_global"));
    assert!(matcher.is_similar("mynykaa", "mynykaa_official"));
}

#[test]
fn unrelated_usernames_are_not_similar() {
    let matcher = UsernameMatcher::default();
    assert!(!matcher.is_similar("acme", "jane_doe"));
    assert!(!matcher.is_similar("mamaearth", "mynykaa"));
}

#[test]
fn substring_rule_catches_heavy_expansion() {
    let matcher = UsernameMatcher::default();
    // Ratio is well below threshold, but one normalized form contains the
    // other and both are long enough.
    assert!(matcher.is_similar("glowbeauty", "glowbeautyhqsouthasia"));
}

#[test]
fn substring_rule_requires_minimum_length() {
    let matcher = UsernameMatcher::default();
    // "ab" is contained in "absolutely" but is far too short to count.
    assert!(!matcher.is_similar("ab", "absolutely"));
}

#[test]
fn is_similar_is_symmetric() {
    let matcher = UsernameMatcher::default();
    let pairs = [
        ("mamaearth.in", "mamaearth_global"),
        ("acme", "acme_global"),
        ("acme", "jane_doe"),
        ("glowbeauty", "glowbeautyhqsouthasia"),
        ("brand_official", "official_brand"),
    ];
    for (a, b) in pairs {
        assert_eq!(
            matcher.is_similar(a, b),
            matcher.is_similar(b, a),
            "asymmetric for ({a}, {b})"
        );
    }
}

#[test]
fn threshold_is_configurable() {
    let strict = UsernameMatcher::default();
    let loose = UsernameMatcher::with_threshold(0.5);
    // "acme1" vs "acme2": ratio 2*4/10 = 0.8.
    assert!(!strict.is_similar("acme1", "acme2"));
    assert!(loose.is_similar("acme1", "acme2"));
}

#[test]
fn catalogue_is_configurable() {
    let mut matcher = UsernameMatcher::default();
    matcher.suffixes.push("_hq".to_owned());
    assert_eq!(matcher.normalize("acme_hq"), "acme");
    assert!(matcher.is_similar("acme", "acme_hq"));
}
