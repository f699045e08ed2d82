//! Key and slug normalization for human-written spreadsheet labels.
//!
//! Labels in source workbooks mix case, accents, punctuation and languages
//! (`"Cylindrée (cm³)"`, `"Prix (TND)"`, `"Sous-catégorie"`). Both functions
//! here fold them to ASCII so that spelling variants collapse to one key.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a string to lowercase ASCII-friendly text: accents removed, common
/// ligatures expanded. Characters without an ASCII base are kept as-is so the
/// caller decides what counts as a separator.
pub fn fold_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        match c {
            'œ' | 'Œ' => out.push_str("oe"),
            'æ' | 'Æ' => out.push_str("ae"),
            'ß' => out.push_str("ss"),
            'ø' | 'Ø' => out.push('o'),
            'đ' | 'Đ' => out.push('d'),
            'ł' | 'Ł' => out.push('l'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Normalize a column or row label into a stable snake_case ASCII key.
///
/// Empty or whitespace-only input yields an empty string; callers treat an
/// empty key as unusable.
///
/// ```
/// use moto_catalog::normalize::normalize_key;
///
/// assert_eq!(normalize_key("Cylindrée"), "cylindree");
/// assert_eq!(normalize_key("  Prix (TND) "), "prix_tnd");
/// assert_eq!(normalize_key("Sous-catégorie"), "sous_categorie");
/// ```
pub fn normalize_key(raw: &str) -> String {
    join_alphanumeric_runs(raw, '_')
}

/// Convert a display string to a URL-safe slug: lowercase ASCII, runs of
/// anything else collapsed to a single `-`, no leading or trailing dash.
///
/// `slugify(slugify(s)) == slugify(s)` for every `s`.
pub fn slugify(s: &str) -> String {
    join_alphanumeric_runs(s, '-')
}

fn join_alphanumeric_runs(s: &str, separator: char) -> String {
    let folded = fold_diacritics(s.trim());
    let mut result = String::with_capacity(folded.len());
    let mut last_was_separator = false;

    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push(separator);
            last_was_separator = true;
        }
    }

    // Trim trailing separator
    if result.ends_with(separator) {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_ligatures() {
        assert_eq!(fold_diacritics("Cœur"), "coeur");
        assert_eq!(fold_diacritics("Straße"), "strasse");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(normalize_key("Couple  max. (Nm)"), "couple_max_nm");
        assert_eq!(slugify("  KTM -- 390 Duke!"), "ktm-390-duke");
    }

    #[test]
    fn test_non_latin_only_is_empty() {
        assert_eq!(normalize_key("日本"), "");
    }
}
