//! Slug generation for research titles.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s.\-]").expect("valid disallowed-char pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen pattern"));

/// Convert a title to a URL-safe slug
///
/// Rules, applied in order:
/// - Lowercase
/// - Delete dollar signs
/// - Delete everything except ASCII letters, digits, `_`, whitespace, `.` and `-`
/// - Replace whitespace runs with a hyphen
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens, then whitespace
///
/// Decimal points survive, so prices and multipliers stay readable.
///
/// # Examples
///
/// ```
/// use folio_core::slugify;
///
/// assert_eq!(slugify("Oracle & NetSuite: Cloud Solutions!"), "oracle-netsuite-cloud-solutions");
/// assert_eq!(slugify("SAP Datasphere powers 1.3X faster data access"), "sap-datasphere-powers-1.3x-faster-data-access");
/// ```
pub fn slugify(title: &str) -> String {
    let lowercased = title.to_lowercase();
    let without_dollars = lowercased.replace('$', "");
    let cleaned = DISALLOWED.replace_all(&without_dollars, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&cleaned, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').trim().to_string()
}
