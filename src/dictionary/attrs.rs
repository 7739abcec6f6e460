//! Canonical ordering of part-of-speech attributes
//!
//! `v:klcp1,t_c` and `v:t_c,klcp1` describe the same entry; the rewriter always
//! writes the second form so that reruns produce no diff.

use std::cmp::Ordering;

/// Attributes specific to (and mutually exclusive within) a part of speech
const POS_SPECIFIC_ATTRIBUTES: &[&str] = &[
    "ambi", "i", "i_c", "is", "t", "t_c", "pref", "suff", "name", "num", "pro", "body", "being",
    "place", "inhpl", "inhps", "plural", "eu", "idiom", "mv", "nt", "phr", "prov", "Ql", "rej",
    "rp", "sp", "toast", "lyr", "bc", "epithet",
];

fn tier(attr: &str) -> u8 {
    if !attr.is_empty() && attr.chars().all(|c| c.is_ascii_digit()) {
        // homophone number
        0
    } else if POS_SPECIFIC_ATTRIBUTES.contains(&attr) {
        1
    } else {
        // categories and metadata tags
        2
    }
}

/// Homophone numbers first, then part-of-speech-specific tags, then the rest
pub fn compare_attributes(a: &str, b: &str) -> Ordering {
    tier(a).cmp(&tier(b)).then_with(|| a.cmp(b))
}

/// Sort a comma-separated attribute list
pub fn sort_attributes(attrs: &str) -> String {
    let mut attrs: Vec<&str> = attrs.split(',').collect();
    attrs.sort_by(|a, b| compare_attributes(a, b));
    attrs.join(",")
}

/// `category:attrs` with the attributes in canonical order
pub fn order_part_of_speech(category: &str, attrs: &str) -> String {
    format!("{}:{}", category, sort_attributes(attrs))
}
