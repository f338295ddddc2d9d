use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical form for name comparison: NFD, combining marks stripped, lowercased.
pub fn normalize_name(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Diacritic- and case-insensitive equality of a trimmed guess against a target name.
pub fn names_match(guess: &str, target: &str) -> bool {
    normalize_name(guess.trim()) == normalize_name(target)
}
