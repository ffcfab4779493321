use serde::{Deserialize, Serialize};

/// A named medical location with an address and a category label.
///
/// Two facilities are the same entry when `name` and `address` match exactly
/// (case-sensitive); `facility_type` does not take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub facility_type: String,
}

impl Facility {
    pub fn new(name: &str, address: &str, facility_type: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            facility_type: facility_type.to_string(),
        }
    }

    /// Deduplication key.
    pub fn identity(&self) -> (&str, &str) {
        (&self.name, &self.address)
    }

    /// Map search link for renderers that offer a "open in maps" action.
    pub fn maps_search_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&format!("{}, {}", self.name, self.address))
        )
    }
}
