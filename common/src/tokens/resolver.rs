//! Maps a clicked token to a semantic role.
//!
//! Tokens whose bracket text names a role ("[OEM]", "[Business Head]")
//! resolve through the ordered keyword table alone. The generic "[Name]"
//! placeholder is context-sensitive: the same literal can resolve to
//! different roles at different positions in the same query, driven by the
//! words preceding the occurrence and by known two-role relationship
//! phrases.
//!
//! The rule order below is load-bearing. Later rules are deliberately
//! broader fallbacks, and the final answer is always Business Head so the
//! picker can open with *some* candidate list instead of an error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::role::{Role, DIRECT_ROLE_KEYWORDS};

/// Case-insensitive match for the generic placeholder itself.
static NAME_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[name\]").expect("valid name token regex"));

/// Single-role context patterns, tested in priority order against the
/// recent-word window and then the full text preceding the clicked token.
/// All patterns run on lower-cased text.
static CONTEXT_PATTERNS: Lazy<Vec<(Role, Regex)>> = Lazy::new(|| {
    [
        (Role::Oem, r"\boem\b"),
        (Role::Partner, r"\bpartner\b"),
        (Role::EndCustomer, r"\bend customer\b|\bcustomer\b"),
        (Role::BusinessHead, r"\bbusiness head\b"),
        (Role::GroupBusinessManager, r"\bgroup business manager\b"),
        (Role::GroupChannelChamp, r"\bgroup channel champ\b"),
        (Role::ChannelChamp, r"\bchannel champ\b"),
        (Role::VerticalChamp, r"\bvertical champ\b"),
        (
            Role::RegionalCommercialBusinessManager,
            r"\bregional commercial business manager\b|\bbusiness manager\b",
        ),
        (Role::VerticalAccount, r"\bvertical account\b|\baccount\b"),
    ]
    .into_iter()
    .map(|(role, pattern)| (role, Regex::new(pattern).expect("valid context pattern")))
    .collect()
});

/// Two-role relationship phrases, tested against the full lower-cased
/// query. For the first phrase that matches, `[name]` occurrences before
/// the clicked one select between the pair: none before means the first
/// role, one or more means the second (when the phrase defines one).
static RELATIONSHIP_PATTERNS: Lazy<Vec<(Regex, Role, Option<Role>)>> = Lazy::new(|| {
    [
        (
            r"\bbusiness head\b.*\bwith\b.*\boem\b",
            Role::BusinessHead,
            Some(Role::Oem),
        ),
        (
            r"\bbusiness head\b.*\bwith\b.*\bpartner\b",
            Role::BusinessHead,
            Some(Role::Partner),
        ),
        (
            r"\boem\b.*\bwith\b.*\bpartner\b",
            Role::Oem,
            Some(Role::Partner),
        ),
        (
            r"\bchannel champ\b.*\bpartner\b",
            Role::ChannelChamp,
            Some(Role::Partner),
        ),
        (
            r"\bgroup business manager\b.*\boem\b",
            Role::GroupBusinessManager,
            Some(Role::Oem),
        ),
        (
            r"\bvertical champ\b.*\baccount\b",
            Role::VerticalChamp,
            Some(Role::VerticalAccount),
        ),
        (
            r"\bbusiness head\b.*\bcustomer\b",
            Role::BusinessHead,
            Some(Role::EndCustomer),
        ),
    ]
    .into_iter()
    .map(|(pattern, first, second)| {
        (
            Regex::new(pattern).expect("valid relationship pattern"),
            first,
            second,
        )
    })
    .collect()
});

/// Whole-text keyword fallback, first hit in this order wins.
const FALLBACK_KEYWORDS: &[(&str, Role)] = &[
    ("business manager", Role::RegionalCommercialBusinessManager),
    ("group channel champ", Role::GroupChannelChamp),
    ("channel champ", Role::ChannelChamp),
    ("vertical champ", Role::VerticalChamp),
    ("business head", Role::BusinessHead),
    ("group business manager", Role::GroupBusinessManager),
    ("oem", Role::Oem),
    ("partner", Role::Partner),
    ("end customer", Role::EndCustomer),
    ("customer", Role::EndCustomer),
    ("vertical account", Role::VerticalAccount),
];

/// Number of preceding words the context window covers.
const RECENT_WINDOW_WORDS: usize = 5;

/// Resolves a token's literal content to a role.
///
/// `literal` is the bracket-interior text (already normalized by the
/// parser, but normalized again here so the function stands alone),
/// `full_text` is the entire input string, and `ordinal` is the 0-based
/// rank of the clicked occurrence among tokens with the same literal.
///
/// Pure function of its inputs; never fails.
pub fn resolve(literal: &str, full_text: &str, ordinal: usize) -> Role {
    let literal = literal.trim().to_lowercase();

    if literal != "name" {
        for (keyword, role) in DIRECT_ROLE_KEYWORDS {
            if literal == *keyword {
                return *role;
            }
        }
        for (keyword, role) in DIRECT_ROLE_KEYWORDS {
            if literal.contains(keyword) {
                return *role;
            }
        }
        return Role::BusinessHead;
    }

    resolve_generic_name(full_text, ordinal)
}

fn resolve_generic_name(full_text: &str, ordinal: usize) -> Role {
    if let Some(target) = NAME_TOKEN_RE.find_iter(full_text).nth(ordinal) {
        let preceding = full_text[..target.start()].to_lowercase();

        if let Some(role) = match_context(&preceding) {
            return role;
        }
        if let Some(role) = match_relationship(full_text, target.start()) {
            return role;
        }
    }

    whole_text_fallback(full_text)
}

/// Tests the single-role patterns against the last few words before the
/// token, then against everything before it.
fn match_context(preceding: &str) -> Option<Role> {
    let window = recent_window(preceding, RECENT_WINDOW_WORDS);
    for (role, pattern) in CONTEXT_PATTERNS.iter() {
        if pattern.is_match(&window) || pattern.is_match(preceding) {
            return Some(*role);
        }
    }
    None
}

fn match_relationship(full_text: &str, target_offset: usize) -> Option<Role> {
    let lowered = full_text.to_lowercase();
    for (pattern, first, second) in RELATIONSHIP_PATTERNS.iter() {
        if !pattern.is_match(&lowered) {
            continue;
        }
        let names_before = NAME_TOKEN_RE
            .find_iter(full_text)
            .filter(|m| m.start() < target_offset)
            .count();
        if names_before == 0 {
            return Some(*first);
        }
        return *second;
    }
    None
}

fn whole_text_fallback(full_text: &str) -> Role {
    let lowered = full_text.to_lowercase();
    for (keyword, role) in FALLBACK_KEYWORDS {
        if lowered.contains(keyword) {
            return *role;
        }
    }
    Role::BusinessHead
}

fn recent_window(text: &str, words: usize) -> String {
    let all: Vec<&str> = text.split_whitespace().collect();
    let start = all.len().saturating_sub(words);
    all[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_mapping_ignores_context_and_ordinal() {
        for (text, ordinal) in [("", 0), ("partner partner partner", 7)] {
            assert_eq!(resolve("oem", text, ordinal), Role::Oem);
            assert_eq!(resolve("business head", text, ordinal), Role::BusinessHead);
            assert_eq!(resolve("year", text, ordinal), Role::Year);
        }
    }

    #[test]
    fn direct_mapping_exact_beats_substring() {
        // "account" appears as a substring of "vertical account", but the
        // exact entry must win first.
        assert_eq!(resolve("vertical account", "", 0), Role::VerticalAccount);
        assert_eq!(
            resolve("business manager", "", 0),
            Role::RegionalCommercialBusinessManager
        );
    }

    #[test]
    fn direct_mapping_substring_uses_table_order() {
        // "top oem partner" contains both "oem" and "partner"; "oem" sits
        // earlier in the table.
        assert_eq!(resolve("top oem partner", "", 0), Role::Oem);
        // A literal embedding "group business manager" must not fall through
        // to the shorter "business manager" entry.
        assert_eq!(
            resolve("the group business manager here", "", 0),
            Role::GroupBusinessManager
        );
    }

    #[test]
    fn unknown_literal_defaults_to_business_head() {
        assert_eq!(resolve("flux capacitor", "whatever", 3), Role::BusinessHead);
    }

    #[test]
    fn name_disambiguates_per_occurrence() {
        let text = "Compare [Business Head] [Name] with [OEM] [Name]";
        assert_eq!(resolve("name", text, 0), Role::BusinessHead);
        assert_eq!(resolve("name", text, 1), Role::Oem);
    }

    #[test]
    fn name_with_no_hints_defaults_to_business_head() {
        assert_eq!(
            resolve("name", "just some text with no role hints", 0),
            Role::BusinessHead
        );
    }

    #[test]
    fn name_context_window_sees_recent_partner() {
        let text = "show revenue for partner [Name]";
        assert_eq!(resolve("name", text, 0), Role::Partner);
    }

    #[test]
    fn name_context_prefers_oem_over_earlier_roles() {
        // Both "business head" and "oem" precede the token; the OEM pattern
        // has higher priority regardless of distance.
        let text = "business head working alongside oem [Name]";
        assert_eq!(resolve("name", text, 0), Role::Oem);
    }

    #[test]
    fn relationship_splits_first_and_second_name() {
        // No role keyword directly precedes either [Name]; the relationship
        // phrase at the end drives both resolutions.
        let text = "Link [Name] and [Name] where the business head works with the oem";
        assert_eq!(resolve("name", text, 0), Role::BusinessHead);
        assert_eq!(resolve("name", text, 1), Role::Oem);
    }

    #[test]
    fn relationship_three_names_after_first_take_second_role() {
        // Documents (not guarantees) behavior beyond the second token: the
        // before/at-or-after split sends every later occurrence to the
        // second role.
        let text = "Map [Name] then [Name] then [Name]: business head works with the oem";
        assert_eq!(resolve("name", text, 0), Role::BusinessHead);
        assert_eq!(resolve("name", text, 1), Role::Oem);
        assert_eq!(resolve("name", text, 2), Role::Oem);
    }

    #[test]
    fn out_of_range_ordinal_uses_whole_text_fallback() {
        // Only one [Name] exists; ordinal 5 finds no occurrence, so the
        // whole-text keyword scan answers. "partner" appears after the
        // token, which the pre-token window could never see.
        let text = "[Name] ranked by partner revenue";
        assert_eq!(resolve("name", text, 5), Role::Partner);
    }

    #[test]
    fn fallback_list_order_is_fixed() {
        // "business manager" precedes "oem" in the fallback list even
        // though OEM outranks it in the context patterns.
        // Nothing precedes the token and no relationship phrase matches,
        // so the whole-text list decides.
        let text = "[Name] somewhere, business manager and oem mentioned later";
        assert_eq!(
            resolve("name", text, 0),
            Role::RegionalCommercialBusinessManager
        );
    }

    #[test]
    fn resolve_never_panics_on_odd_input() {
        for text in ["", "]][[", "[name", "\u{1F600} [Name] \u{1F600}"] {
            let _ = resolve("name", text, 0);
            let _ = resolve("name", text, 99);
            let _ = resolve("", text, 0);
        }
    }
}
