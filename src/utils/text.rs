// src/utils/text.rs

//! Text formatting helpers for notification bodies.

use std::sync::LazyLock;

use regex::Regex;

/// Slug parts that are always rendered fully capitalized.
const ALWAYS_CAPS: [&str; 2] = ["COD", "CDL"];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap());

/// Convert a comma-separated slug list into readable labels.
///
/// # Examples
/// ```
/// use broadcast::utils::text::unslug;
///
/// assert_eq!(unslug("call-of-duty,cdl"), "Call Of Duty, CDL");
/// ```
pub fn unslug(input: &str) -> String {
    input
        .split(',')
        .map(|item| {
            item.split('-')
                .map(|part| {
                    let upper = part.to_uppercase();
                    if ALWAYS_CAPS.contains(&upper.as_str()) {
                        upper
                    } else {
                        title_case(part)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_word = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Remove HTML tags and character entities without inserting replacement text.
///
/// # Examples
/// ```
/// use broadcast::utils::text::strip_html;
///
/// assert_eq!(strip_html("<p>Hello &amp; welcome</p>"), "Hello  welcome");
/// ```
pub fn strip_html(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, "");
    ENTITY_RE.replace_all(&without_tags, "").trim().to_string()
}
