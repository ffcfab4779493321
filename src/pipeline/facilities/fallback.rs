use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::interpret::InterpretedQuery;
use crate::models::Facility;

/// Whether the optional `Advanced {type} Services` entry is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdEntryPolicy {
    /// Always two entries.
    Never,
    /// Always three entries.
    Always,
    /// Included when the first SHA-256 byte of the normalized query is even.
    #[default]
    QueryHash,
}

impl ThirdEntryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::QueryHash => "query_hash",
        }
    }

    fn includes_third(&self, query: &str) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::QueryHash => {
                let digest = Sha256::digest(query.trim().to_lowercase().as_bytes());
                digest[0] % 2 == 0
            }
        }
    }
}

impl std::str::FromStr for ThirdEntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "query_hash" | "hash" => Ok(Self::QueryHash),
            other => Err(format!("unknown fallback policy: {other}")),
        }
    }
}

/// Synthesize generic, clearly non-authoritative entries for a query the
/// catalog could not answer.
///
/// Every entry carries the interpreted facility type and embeds the
/// interpreted location in its address.
pub fn generate_fallback(
    query: &str,
    interpreted: &InterpretedQuery,
    policy: ThirdEntryPolicy,
) -> Vec<Facility> {
    let facility_type = interpreted.facility_type.as_str();
    let location = interpreted.location.as_str();

    let mut entries = vec![
        Facility::new(
            &format!("General {facility_type} of {location}"),
            &format!("123 Health St, {location}, Earth"),
            facility_type,
        ),
        Facility::new(
            &format!("Community {facility_type} Center"),
            &format!("456 Care Ave, {location}, Earth"),
            facility_type,
        ),
    ];

    if policy.includes_third(query) {
        entries.push(Facility::new(
            &format!("Advanced {facility_type} Services"),
            &format!("789 Wellness Blvd, {location}, Earth"),
            facility_type,
        ));
    }

    entries
}
