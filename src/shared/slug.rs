//! Slug derivation for catalog names.

/// Characters dropped from names before building a slug.
pub const STRIPPED_CHARS: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Derive a URL-safe slug from a display name.
///
/// Lowercases the name, drops every char in [`STRIPPED_CHARS`] and joins
/// the remaining whitespace-separated words with a single `-`.
///
/// ```
/// use storefront_catalog::shared::slug::slugify;
///
/// assert_eq!(slugify("Silk Dresses (Pre-fall)"), "silk-dresses-pre-fall");
/// ```
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| word.trim_matches('-'))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
