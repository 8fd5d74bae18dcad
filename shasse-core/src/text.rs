//! Small text helpers shared by the canonicalization tables and the scraper.
//!
//! Wiki markup is hand-authored, so everything that compares text goes through
//! these helpers: whitespace is collapsed, case is folded, and keyword lookups
//! respect word boundaries so that short names like "Or" never match inside
//! "Forêt".

/// Collapse every run of whitespace (including non-breaking spaces) into a
/// single ASCII space and trim both ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Separators authors use between sub-phrases inside a single cell.
const SEPARATORS: &[char] = &['|', '/', ',', ';', '-', '•'];

/// Collapse whitespace, then collapse repeated separators (`"a | | b"` becomes
/// `"a | b"`) and strip separators dangling at either end.
pub fn collapse_separators(s: &str) -> String {
    let ws = normalize_ws(s);
    let mut out = String::with_capacity(ws.len());
    let mut last_sep: Option<char> = None;

    for token in ws.split(' ') {
        let mut chars = token.chars();
        let single_sep = match (chars.next(), chars.next()) {
            (Some(c), None) if SEPARATORS.contains(&c) => Some(c),
            _ => None,
        };

        match single_sep {
            Some(sep) if last_sep == Some(sep) => continue,
            Some(sep) => last_sep = Some(sep),
            None => last_sep = None,
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }

    out.trim_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .to_string()
}

/// Case- and whitespace-folded form used for equality keys.
pub fn fold_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// Whether `needle` occurs in `haystack` as a whole word or phrase.
///
/// Both sides are compared lowercase. A match only counts when the characters
/// immediately before and after it are not alphanumeric, so `"or"` is found in
/// `"Or / Argent"` but not in `"Forêt"`.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    let hay = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(rel) = hay[from..].find(&needle) {
        let start = from + rel;
        let end = start + needle.len();
        let before_ok = hay[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = hay[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        // Advance past the first char of this occurrence.
        from = start + hay[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Whether any word of `haystack` starts with `prefix` (case-insensitive).
///
/// Used for place keywords where plurals and compounds should still match
/// (`"grotte"` matches `"Grottes Azurées"`).
pub fn has_word_starting_with(haystack: &str, prefix: &str) -> bool {
    let prefix = prefix.to_lowercase();
    haystack
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| !word.is_empty() && word.starts_with(&prefix))
}

/// Replace French accented letters with their ASCII base letter.
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'à' | 'â' | 'ä' => 'a',
            'À' | 'Â' | 'Ä' => 'A',
            'ù' | 'û' | 'ü' => 'u',
            'Ù' | 'Û' | 'Ü' => 'U',
            'ô' | 'ö' => 'o',
            'Ô' | 'Ö' => 'O',
            'î' | 'ï' => 'i',
            'Î' | 'Ï' => 'I',
            'ç' => 'c',
            'Ç' => 'C',
            'ÿ' => 'y',
            other => other,
        })
        .collect()
}

/// Truncate to at most `max` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  Route \n 1  "), "Route 1");
        assert_eq!(normalize_ws("Zone\u{a0}Côtière"), "Zone Côtière");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn test_collapse_separators() {
        assert_eq!(collapse_separators("Route 1 | | Route 2"), "Route 1 | Route 2");
        assert_eq!(collapse_separators("| Route 1 /"), "Route 1");
        assert_eq!(collapse_separators("50% | TC = 10%"), "50% | TC = 10%");
        assert_eq!(collapse_separators("Ultra-Soleil"), "Ultra-Soleil");
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("Or / Argent", "or"));
        assert!(!contains_word("Forêt de Jade", "or"));
        assert!(contains_word("Pokémon X", "x"));
        assert!(!contains_word("RougeRencontre", "rouge"));
        assert!(contains_word("Écarlate/Violet", "violet"));
    }

    #[test]
    fn test_has_word_starting_with() {
        assert!(has_word_starting_with("Grottes Azurées", "grotte"));
        assert!(has_word_starting_with("Route 12", "route"));
        assert!(!has_word_starting_with("Déroute", "route"));
    }

    #[test]
    fn test_fold_accents_and_truncate() {
        assert_eq!(fold_accents("Flabébé"), "Flabebe");
        assert_eq!(truncate_chars("Écarlate", 3), "Éca");
        assert_eq!(truncate_chars("Or", 10), "Or");
    }
}
