//! Identifier generation
//!
//! Produces fresh opaque identifiers in the formats VS Code based editors
//! store in their `storage.json`. Every call draws new randomness; nothing is
//! cached or seeded.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowercase hex string of `2 * byte_length` characters from the OS CSPRNG
pub fn random_hex(byte_length: usize) -> String {
    let mut bytes = vec![0u8; byte_length];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Canonical hyphenated lowercase UUID v4
pub fn random_uuid_v4() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// UUID v4 without hyphens (32 hex characters)
pub fn random_uuid_v4_compact() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Uppercase UUID v4 in GUID braces, e.g. `{0865FE45-0306-498C-86B1-1ED1125B1DF2}`
pub fn random_uuid_v4_braced_upper() -> String {
    Uuid::new_v4().braced().to_string().to_uppercase()
}

/// How a field's replacement value is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdStrategy {
    /// 32 random bytes as 64 lowercase hex characters
    #[serde(rename = "random-hex32")]
    RandomHex32,
    /// Two compact UUID v4 values concatenated (64 hex characters)
    #[serde(rename = "random-uuid-v4-pair")]
    RandomUuidV4Pair,
    /// `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
    #[serde(rename = "random-uuid-v4-braced-upper")]
    RandomUuidV4BracedUpper,
    /// `xxxxxxxx-xxxx-4xxx-xxxx-xxxxxxxxxxxx`
    #[serde(rename = "random-uuid-v4")]
    RandomUuidV4,
}

impl IdStrategy {
    /// Draw a new value
    pub fn generate(self) -> String {
        match self {
            IdStrategy::RandomHex32 => random_hex(32),
            IdStrategy::RandomUuidV4Pair => {
                format!("{}{}", random_uuid_v4_compact(), random_uuid_v4_compact())
            }
            IdStrategy::RandomUuidV4BracedUpper => random_uuid_v4_braced_upper(),
            IdStrategy::RandomUuidV4 => random_uuid_v4(),
        }
    }

    /// Check whether `value` has the shape this strategy produces
    pub fn matches(self, value: &str) -> bool {
        match self {
            IdStrategy::RandomHex32 | IdStrategy::RandomUuidV4Pair => {
                value.len() == 64 && is_lower_hex(value)
            }
            IdStrategy::RandomUuidV4BracedUpper => value
                .strip_prefix('{')
                .and_then(|v| v.strip_suffix('}'))
                .is_some_and(|inner| is_hyphenated(inner, is_upper_hex_digit)),
            IdStrategy::RandomUuidV4 => is_hyphenated(value, is_lower_hex_digit),
        }
    }

    /// Short human-readable description of the format
    pub fn describe(self) -> &'static str {
        match self {
            IdStrategy::RandomHex32 => "64 hex characters",
            IdStrategy::RandomUuidV4Pair => "64 hex characters (two UUIDs)",
            IdStrategy::RandomUuidV4BracedUpper => "braced uppercase UUID",
            IdStrategy::RandomUuidV4 => "UUID",
        }
    }
}

fn is_lower_hex_digit(c: char) -> bool {
    c.is_ascii_digit() || ('a'..='f').contains(&c)
}

fn is_upper_hex_digit(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='F').contains(&c)
}

fn is_lower_hex(value: &str) -> bool {
    value.chars().all(is_lower_hex_digit)
}

/// `8-4-4-4-12` groups whose characters all satisfy `is_digit`
fn is_hyphenated(value: &str, is_digit: fn(char) -> bool) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(group, len)| group.len() == len && group.chars().all(is_digit))
}
