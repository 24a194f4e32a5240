//! Localized numeric normalization.
//!
//! EDINET filings render numbers with full-width digits, thousands
//! separators, Japanese minus glyphs (△/▲), and share-count unit
//! suffixes (千株/百株/株). Inline-XBRL additionally carries `scale` and
//! `sign` attributes that apply after base parsing.

/// Share-count unit suffixes and their multipliers.
///
/// Ordered longest-first so `千株` wins over the bare `株` it contains.
const SHARE_UNITS: &[(&str, i64)] = &[("千株", 1_000), ("百株", 100), ("株", 1)];

/// Multiplier for a share-count unit embedded in arbitrary header text
/// (e.g., a column header `所有株式数（千株）`).
///
/// `百万株` is checked before the two-character units so the larger
/// exponent is never shadowed.
pub fn unit_multiplier(text: &str) -> Option<i64> {
    const HEADER_UNITS: &[(&str, i64)] = &[("百万株", 1_000_000), ("千株", 1_000), ("百株", 100)];
    HEADER_UNITS
        .iter()
        .find(|(unit, _)| text.contains(unit))
        .map(|(_, mult)| *mult)
}

/// Parse localized numeric text into a signed integer.
///
/// Full-width digits are folded to ASCII, separators and whitespace
/// stripped, △/▲ mapped to `-`, and a share-unit suffix applied as a
/// multiplier. The unit counts only when it directly follows the digit
/// run; `株` appearing in surrounding prose (`普通株式1,234`) is not a
/// unit. Returns `None` when no digits are present.
///
/// ```
/// use edinet_rs::xbrl::num::parse_number;
/// assert_eq!(parse_number("１，２３４千株"), Some(1_234_000));
/// assert_eq!(parse_number("△500"), Some(-500));
/// assert_eq!(parse_number("普通株式1,234"), Some(1_234));
/// assert_eq!(parse_number("garbage"), None);
/// ```
pub fn parse_number(text: &str) -> Option<i64> {
    let cleaned = clean(text);
    let chars: Vec<char> = cleaned.chars().collect();

    let start = chars.iter().position(|c| c.is_ascii_digit())?;
    let negative = start > 0 && chars[start - 1] == '-';
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }

    let digits: String = chars[start..end].iter().collect();
    let n: i64 = digits.parse().ok()?;
    let n = if negative { -n } else { n };

    let rest: String = chars[end..].iter().collect();
    let multiplier = SHARE_UNITS
        .iter()
        .find(|(unit, _)| rest.starts_with(unit))
        .map_or(1, |(_, mult)| *mult);
    Some(n.saturating_mul(multiplier))
}

/// Parse a percentage/ratio out of localized text.
///
/// Absence of a ratio is semantically "0%", not "unknown", so failures
/// return `0.0` rather than `None`.
///
/// ```
/// use edinet_rs::xbrl::num::parse_ratio;
/// assert_eq!(parse_ratio("12.5%"), 12.5);
/// assert_eq!(parse_ratio(""), 0.0);
/// ```
pub fn parse_ratio(text: &str) -> f64 {
    parse_decimal(text).unwrap_or(0.0)
}

/// Parse a signed decimal out of localized text, `None` when absent.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = clean(text);
    let bytes: Vec<char> = cleaned.chars().collect();

    let mut start = None;
    for (i, c) in bytes.iter().enumerate() {
        if c.is_ascii_digit() {
            start = Some(if i > 0 && bytes[i - 1] == '-' { i - 1 } else { i });
            break;
        }
    }
    let start = start?;

    let mut end = start;
    let mut seen_dot = false;
    for (i, c) in bytes.iter().enumerate().skip(start) {
        if c.is_ascii_digit() || *c == '-' && i == start {
            end = i + 1;
        } else if *c == '.' && !seen_dot && end == i {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }

    let run: String = bytes[start..end].iter().collect();
    run.trim_end_matches('.').parse().ok()
}

/// Apply inline-XBRL `scale` (power-of-ten exponent) and `sign`
/// (`"-"` forces a positive value negative) attributes to a parsed value.
pub fn apply_scale_sign(value: i64, scale: Option<&str>, sign: Option<&str>) -> i64 {
    let mut v = value;
    if let Some(exp) = scale.and_then(|s| s.trim().parse::<i32>().ok()) {
        if exp >= 0 {
            v = v.saturating_mul(10_i64.saturating_pow(exp as u32));
        } else {
            v /= 10_i64.saturating_pow(exp.unsigned_abs());
        }
    }
    if sign == Some("-") && v > 0 {
        v = -v;
    }
    v
}

/// Fold full-width digits to ASCII, map Japanese minus glyphs to `-`, and
/// strip separators and whitespace (including U+3000).
fn clean(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => {
                char::from_u32(u32::from(c) - 0xFF10 + u32::from(b'0'))
            }
            '\u{FF0E}' => Some('.'),
            '△' | '▲' => Some('-'),
            ',' | '，' => None,
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}
