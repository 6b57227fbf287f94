use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of semantic roles a bracketed token can denote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    BusinessHead,
    GroupBusinessManager,
    ChannelChamp,
    GroupChannelChamp,
    VerticalAccount,
    VerticalChamp,
    RegionalCommercialBusinessManager,
    Year,
    Oem,
    Partner,
    EndCustomer,
}

impl Role {
    pub const ALL: [Role; 11] = [
        Role::BusinessHead,
        Role::GroupBusinessManager,
        Role::ChannelChamp,
        Role::GroupChannelChamp,
        Role::VerticalAccount,
        Role::VerticalChamp,
        Role::RegionalCommercialBusinessManager,
        Role::Year,
        Role::Oem,
        Role::Partner,
        Role::EndCustomer,
    ];

    /// Human-readable name. Also the key under which candidate lists are
    /// published by the dataset catalog endpoint.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::BusinessHead => "Business Head",
            Role::GroupBusinessManager => "Group Business Manager",
            Role::ChannelChamp => "Channel Champ",
            Role::GroupChannelChamp => "Group Channel Champ",
            Role::VerticalAccount => "Vertical Account",
            Role::VerticalChamp => "Vertical Champ",
            Role::RegionalCommercialBusinessManager => "Regional Commercial Business Manager",
            Role::Year => "Year",
            Role::Oem => "OEM",
            Role::Partner => "Partner",
            Role::EndCustomer => "End Customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direct keyword table for tokens whose bracket text already names a role.
///
/// This is an ordered slice on purpose: the resolver takes the first exact
/// match, then the first substring match, in insertion order. Longer phrases
/// sit above the shorter phrases they contain ("group business manager"
/// before "business manager", "vertical account" before "account") so the
/// substring pass cannot short-circuit them.
pub const DIRECT_ROLE_KEYWORDS: &[(&str, Role)] = &[
    ("business head", Role::BusinessHead),
    ("group business manager", Role::GroupBusinessManager),
    ("group channel champ", Role::GroupChannelChamp),
    ("channel champ", Role::ChannelChamp),
    ("vertical champ", Role::VerticalChamp),
    ("vertical account", Role::VerticalAccount),
    ("regional commercial business manager", Role::RegionalCommercialBusinessManager),
    ("business manager", Role::RegionalCommercialBusinessManager),
    ("account", Role::VerticalAccount),
    ("end customer", Role::EndCustomer),
    ("customer", Role::EndCustomer),
    ("year", Role::Year),
    ("oem", Role::Oem),
    ("partner", Role::Partner),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_unique() {
        for (i, a) in Role::ALL.iter().enumerate() {
            for b in &Role::ALL[i + 1..] {
                assert_ne!(a.display_name(), b.display_name());
            }
        }
    }

    #[test]
    fn longer_keywords_precede_their_substrings() {
        let position = |kw: &str| {
            DIRECT_ROLE_KEYWORDS
                .iter()
                .position(|(k, _)| *k == kw)
                .unwrap()
        };
        assert!(position("group business manager") < position("business manager"));
        assert!(position("group channel champ") < position("channel champ"));
        assert!(position("vertical account") < position("account"));
        assert!(position("end customer") < position("customer"));
    }
}
