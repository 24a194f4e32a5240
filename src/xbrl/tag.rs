//! Taxonomy-agnostic tag matching.
//!
//! JGAAP and IFRS variants of the same concept differ only by suffix and
//! separator conventions (`CurrentAssets` vs `CurrentAssetsIFRS`,
//! `jppfs_cor:NetSales` vs `NetSales`). Every pattern table in the crate
//! is stored in the normalized form produced here and is matched both
//! against element local names (XML mode) and inline-XBRL `name`
//! attribute local parts (HTML mode).

/// Strip any namespace prefix at the first `:`.
pub fn local_part(raw: &str) -> &str {
    raw.split_once(':').map_or(raw, |(_, rest)| rest)
}

/// Normalize an element or attribute name for taxonomy-agnostic matching.
///
/// Lower-cases, strips underscores and hyphens, and strips a trailing
/// `ifrs` suffix. Idempotent: applying it twice is a no-op.
///
/// ```
/// use edinet_rs::xbrl::tag::normalize_tag_name;
/// assert_eq!(normalize_tag_name("CurrentAssetsIFRS"), "currentassets");
/// assert_eq!(normalize_tag_name("jppfs_cor:NetSales"), "netsales");
/// ```
pub fn normalize_tag_name(raw: &str) -> String {
    let mut s: String = local_part(raw)
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    if let Some(stripped) = s.strip_suffix("ifrs") {
        s.truncate(stripped.len());
    }
    s
}

/// A set of normalized tag patterns.
///
/// Patterns are written pre-normalized; `debug_assert`s in the matchers
/// guard against drift when patterns are edited.
#[derive(Debug, Clone, Copy)]
pub struct TagPatterns(pub &'static [&'static str]);

impl TagPatterns {
    /// Whether the normalized form of `raw` equals any pattern.
    pub fn matches_exact(&self, raw: &str) -> bool {
        let normalized = normalize_tag_name(raw);
        self.0.iter().any(|p| {
            debug_assert_eq!(*p, normalize_tag_name(p));
            normalized == *p
        })
    }

    /// Whether the normalized form of `raw` contains any pattern.
    pub fn matches_contains(&self, raw: &str) -> bool {
        let normalized = normalize_tag_name(raw);
        self.0.iter().any(|p| {
            debug_assert_eq!(*p, normalize_tag_name(p));
            normalized.contains(p)
        })
    }
}
