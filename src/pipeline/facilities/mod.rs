//! Facility resolution engine.
//!
//! Turns a free-text request such as "cardiologists in Pune" into a bounded,
//! deduplicated list of facilities: curated catalog first, synthetic fallback
//! when the catalog has nothing.

pub mod assemble;
pub mod catalog;
pub mod fallback;
pub mod interpret;
pub mod service;

pub use assemble::{MAX_LOOKUP_RESULTS, MAX_SUGGESTED_FACILITIES};
pub use catalog::FacilityCatalog;
pub use fallback::ThirdEntryPolicy;
pub use interpret::{interpret_query, InterpretedQuery};
pub use service::{FacilityLookup, FacilityService};
