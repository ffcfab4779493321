pub mod analysis; // Symptom reasoning + facility tool round-trip
pub mod facilities; // Facility resolution engine
pub mod safety; // Patient input sanitization
