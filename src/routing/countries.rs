/// Country-aware transport selection
///
/// Every destination region lives in one table. Each entry pins down the
/// emergency number, SMS language, which transport delivers reliably there,
/// and carrier quirks (some LATAM routes drop messages that carry a sender
/// ID or a URL).
use crate::models::Transport;
use crate::routing::PhoneNumber;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryProfile {
    pub prefix: &'static str,
    pub name: &'static str,
    pub emergency_number: &'static str,
    pub language: Language,
    pub transport: Transport,
    /// Whether carriers in this region honor an alphanumeric sender ID.
    pub sender_id_supported: bool,
    /// Whether to embed a tracking link. Several LATAM carriers silently
    /// drop messages containing URLs.
    pub include_tracking_url: bool,
}

// The first entry doubles as the default profile for numbers that match
// nothing more specific. Longest prefix wins, so +1809 shadows +1.
const COUNTRY_TABLE: &[CountryProfile] = &[
    CountryProfile {
        prefix: "+1",
        name: "United States",
        emergency_number: "911",
        language: Language::En,
        transport: Transport::Domestic,
        sender_id_supported: true,
        include_tracking_url: true,
    },
    CountryProfile {
        prefix: "+1809",
        name: "Dominican Republic",
        emergency_number: "911",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
    CountryProfile {
        prefix: "+1829",
        name: "Dominican Republic",
        emergency_number: "911",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
    CountryProfile {
        prefix: "+52",
        name: "Mexico",
        emergency_number: "911",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
    CountryProfile {
        prefix: "+56",
        name: "Chile",
        emergency_number: "133",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
    CountryProfile {
        prefix: "+57",
        name: "Colombia",
        emergency_number: "123",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
    CountryProfile {
        prefix: "+58",
        name: "Venezuela",
        emergency_number: "911",
        language: Language::Es,
        transport: Transport::Fallback,
        sender_id_supported: false,
        include_tracking_url: false,
    },
];

/// All supported destination regions, for config introspection.
pub fn profiles() -> &'static [CountryProfile] {
    COUNTRY_TABLE
}

pub fn default_profile() -> &'static CountryProfile {
    &COUNTRY_TABLE[0]
}

/// Selects the country profile for a normalized number.
///
/// Matching is longest-prefix-wins across the table; numbers that match no
/// entry fall back to [`default_profile`].
pub fn select_profile(phone: &PhoneNumber) -> &'static CountryProfile {
    let mut best: Option<&'static CountryProfile> = None;
    for profile in COUNTRY_TABLE {
        if phone.as_str().starts_with(profile.prefix) {
            match best {
                Some(current) if current.prefix.len() >= profile.prefix.len() => {}
                _ => best = Some(profile),
            }
        }
    }
    best.unwrap_or_else(default_profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(raw: &str) -> PhoneNumber {
        PhoneNumber::parse(raw).unwrap()
    }

    #[test]
    fn test_us_number_routes_domestic() {
        let profile = select_profile(&phone("+13053033060"));
        assert_eq!(profile.name, "United States");
        assert_eq!(profile.transport, Transport::Domestic);
        assert_eq!(profile.language, Language::En);
        assert!(profile.include_tracking_url);
    }

    #[test]
    fn test_colombia_routes_fallback_in_spanish() {
        let profile = select_profile(&phone("+573001234567"));
        assert_eq!(profile.name, "Colombia");
        assert_eq!(profile.emergency_number, "123");
        assert_eq!(profile.transport, Transport::Fallback);
        assert_eq!(profile.language, Language::Es);
        assert!(!profile.sender_id_supported);
        assert!(!profile.include_tracking_url);
    }

    #[test]
    fn test_longest_prefix_wins() {
        // +1809 shares the +1 prefix but must not resolve to the US entry.
        let profile = select_profile(&phone("+18095551234"));
        assert_eq!(profile.name, "Dominican Republic");
        assert_eq!(profile.transport, Transport::Fallback);

        // A plain +1 number still hits the US row.
        let us = select_profile(&phone("+12125551234"));
        assert_eq!(us.name, "United States");
    }

    #[test]
    fn test_unknown_prefix_uses_default() {
        let profile = select_profile(&phone("+442071234567"));
        assert_eq!(profile.name, default_profile().name);
        assert_eq!(profile.transport, Transport::Domestic);
    }

    #[test]
    fn test_chile_emergency_number() {
        assert_eq!(select_profile(&phone("+56912345678")).emergency_number, "133");
    }
}
