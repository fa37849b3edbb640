//! Identifiers for participants and markets.
//!
//! Both are usually EVM addresses, which are case-insensitive. Hex addresses
//! are stored lowercased so `0xAbC` and `0xabc` name the same participant;
//! anything else is kept as given, minus surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};

fn is_hex_address(s: &str) -> bool {
    s.len() > 2
        && (s.starts_with("0x") || s.starts_with("0X"))
        && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_hex_address(trimmed) {
        trimmed.to_ascii_lowercase()
    } else {
        trimmed.to_string()
    }
}

macro_rules! address_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, normalizing hex addresses.
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(normalize(id.as_ref()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this is a `0x`-prefixed hex address.
            #[must_use]
            pub fn is_address(&self) -> bool {
                is_hex_address(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

address_id! {
    /// Who placed a bet: a wallet address or any opaque name.
    ParticipantId
}

address_id! {
    /// A market, typically its contract address.
    MarketId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_addresses_compare_case_insensitively() {
        let upper = ParticipantId::new("0xABCdef01");
        let lower = ParticipantId::from("0xabcdef01");
        assert_eq!(upper, lower);
        assert!(upper.is_address());
    }

    #[test]
    fn plain_names_keep_their_case() {
        let id = ParticipantId::from(" Alice ".to_string());
        assert_eq!(id.as_str(), "Alice");
        assert!(!id.is_address());
    }

    #[test]
    fn non_hex_after_prefix_is_not_an_address() {
        let id = MarketId::new("0xNotHex");
        assert_eq!(id.as_str(), "0xNotHex");
        assert!(!id.is_address());
    }

    #[test]
    fn serde_round_trips_through_normalization() {
        let id: ParticipantId = serde_json::from_str("\"0xFF\"").unwrap();
        assert_eq!(id.as_str(), "0xff");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xff\"");
    }

    #[test]
    fn market_id_display() {
        assert_eq!(MarketId::new("0xAA").to_string(), "0xaa");
    }
}
