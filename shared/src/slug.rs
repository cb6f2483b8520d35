//! Slug generation
//!
//! Derives URL-safe identifiers from display names: lower-case, fold common
//! diacritics to ASCII, collapse non-alphanumeric runs into single hyphens,
//! trim leading/trailing hyphens.

/// Fold a single character's common Latin diacritics to ASCII.
fn fold_diacritic(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        'ß' => 's',
        _ => return None,
    };
    Some(folded)
}

/// Generate a slug from a display name.
///
/// Non-ASCII characters without a diacritic fold are dropped; runs of
/// anything that is not `[a-z0-9]` collapse to a single hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(|c| c.to_lowercase()) {
        let c = fold_diacritic(c).unwrap_or(c);
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Check whether a caller-supplied slug is well formed:
/// lowercase alphanumeric segments separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') {
        return false;
    }
    let mut prev_hyphen = false;
    for c in slug.chars() {
        match c {
            'a'..='z' | '0'..='9' => prev_hyphen = false,
            '-' => {
                if prev_hyphen {
                    return false;
                }
                prev_hyphen = true;
            }
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Electronics"), "electronics");
        assert_eq!(slugify("Home & Garden"), "home-garden");
        assert_eq!(slugify("  Mobile   Phones  "), "mobile-phones");
    }

    #[test]
    fn test_slugify_diacritics() {
        assert_eq!(slugify("Café Équipement"), "cafe-equipement");
        assert_eq!(slugify("Niños"), "ninos");
    }

    #[test]
    fn test_slugify_symbol_runs() {
        assert_eq!(slugify("A --- B!!!"), "a-b");
        assert_eq!(slugify("--edge--"), "edge");
        assert_eq!(slugify("50% Off"), "50-off");
    }

    #[test]
    fn test_slugify_drops_unmapped_chars() {
        assert_eq!(slugify("手机 Phones"), "phones");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("electronics"));
        assert!(is_valid_slug("mobile-phones-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("Upper-Case"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for name in ["Electronics", "Café & Bar", "  A  B  ", "50% Off!"] {
            assert!(is_valid_slug(&slugify(name)), "invalid slug for {name:?}");
        }
    }
}
