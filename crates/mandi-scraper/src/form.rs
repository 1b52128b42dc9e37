//! Select-option matching policy.
//!
//! The portal's district and market lists use inconsistent spellings and
//! casing relative to the reference datasets, so those two fields get a
//! matching ladder: exact visible text, then case-insensitive equality or
//! wanted-substring-of-option, then the first available option. Mode,
//! commodity, and state must match exactly.

use crate::page::SelectOption;

const PLACEHOLDER_OPTION: &str = "--Select--";

pub(crate) fn is_placeholder(text: &str) -> bool {
    text.is_empty() || text == PLACEHOLDER_OPTION
}

/// How a flexible match was satisfied, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchKind {
    Exact,
    Fuzzy,
    FirstAvailable,
}

/// Exact visible-text match, skipping the placeholder.
pub(crate) fn match_option_exact<'a>(
    options: &'a [SelectOption],
    wanted: &str,
) -> Option<&'a SelectOption> {
    options
        .iter()
        .find(|o| !is_placeholder(&o.text) && o.text == wanted)
}

/// Flexible match for district/market fields. Returns `None` only when
/// the list has no usable options at all.
pub(crate) fn match_option_flexible<'a>(
    options: &'a [SelectOption],
    wanted: &str,
) -> Option<(&'a SelectOption, MatchKind)> {
    let usable: Vec<&SelectOption> = options.iter().filter(|o| !is_placeholder(&o.text)).collect();
    if usable.is_empty() {
        return None;
    }

    if let Some(option) = usable.iter().copied().find(|o| o.text == wanted) {
        return Some((option, MatchKind::Exact));
    }

    let needle = wanted.to_lowercase();
    let fuzzy = usable.iter().copied().find(|o| {
        let text = o.text.to_lowercase();
        text == needle || text.contains(&needle)
    });
    if let Some(option) = fuzzy {
        return Some((option, MatchKind::Fuzzy));
    }

    Some((usable[0], MatchKind::FirstAvailable))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(texts: &[&str]) -> Vec<SelectOption> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| SelectOption {
                value: i.to_string(),
                text: (*t).to_owned(),
            })
            .collect()
    }

    #[test]
    fn exact_match_skips_placeholder() {
        let opts = options(&["--Select--", "Ludhiana", "Khanna"]);
        let found = match_option_exact(&opts, "Khanna").unwrap();
        assert_eq!(found.text, "Khanna");
        assert!(match_option_exact(&opts, "--Select--").is_none());
    }

    #[test]
    fn flexible_prefers_exact() {
        let opts = options(&["--Select--", "Khanna", "Khanna APMC"]);
        let (found, kind) = match_option_flexible(&opts, "Khanna").unwrap();
        assert_eq!(found.text, "Khanna");
        assert_eq!(kind, MatchKind::Exact);
    }

    #[test]
    fn flexible_falls_back_to_case_insensitive_equality() {
        let opts = options(&["--Select--", "LUDHIANA"]);
        let (found, kind) = match_option_flexible(&opts, "Ludhiana").unwrap();
        assert_eq!(found.text, "LUDHIANA");
        assert_eq!(kind, MatchKind::Fuzzy);
    }

    #[test]
    fn flexible_matches_wanted_as_substring_of_option() {
        let opts = options(&["--Select--", "Jagraon", "Khanna APMC"]);
        let (found, kind) = match_option_flexible(&opts, "khanna").unwrap();
        assert_eq!(found.text, "Khanna APMC");
        assert_eq!(kind, MatchKind::Fuzzy);
    }

    #[test]
    fn flexible_falls_back_to_first_available() {
        let opts = options(&["--Select--", "Ludhiana", "Khanna"]);
        let (found, kind) = match_option_flexible(&opts, "Nowhere").unwrap();
        assert_eq!(found.text, "Ludhiana");
        assert_eq!(kind, MatchKind::FirstAvailable);
    }

    #[test]
    fn flexible_returns_none_without_usable_options() {
        let opts = options(&["--Select--"]);
        assert!(match_option_flexible(&opts, "Ludhiana").is_none());
        assert!(match_option_flexible(&[], "Ludhiana").is_none());
    }
}
