use std::future::Future;
use std::sync::Arc;

use super::assemble::assemble_lookup_results;
use super::catalog::FacilityCatalog;
use super::fallback::{generate_fallback, ThirdEntryPolicy};
use super::interpret::interpret_query;
use crate::models::Facility;

/// The lookup capability offered to the model.
///
/// Infallible: an empty list means "nothing found", which is a valid answer.
pub trait FacilityLookup: Send + Sync {
    fn resolve_facilities(&self, query: &str) -> impl Future<Output = Vec<Facility>> + Send;
}

/// Catalog-backed facility resolution with a synthetic fallback.
#[derive(Debug, Clone)]
pub struct FacilityService {
    catalog: Arc<FacilityCatalog>,
    fallback_policy: ThirdEntryPolicy,
}

impl FacilityService {
    pub fn new(catalog: Arc<FacilityCatalog>, fallback_policy: ThirdEntryPolicy) -> Self {
        Self {
            catalog,
            fallback_policy,
        }
    }

    /// Catalog matches first; fallback only when the catalog is silent.
    pub fn resolve(&self, query: &str) -> Vec<Facility> {
        if query.trim().is_empty() {
            tracing::debug!("Facility lookup skipped: empty query");
            return Vec::new();
        }

        let lower = query.to_lowercase();
        let mut candidates = self.catalog.lookup(&lower);
        let from_catalog = !candidates.is_empty();

        if !from_catalog {
            let interpreted = interpret_query(query);
            tracing::debug!(
                facility_type = %interpreted.facility_type,
                location = %interpreted.location,
                "No curated match, generating fallback facilities"
            );
            candidates = generate_fallback(query, &interpreted, self.fallback_policy);
        }

        let results = assemble_lookup_results(candidates);
        if results.is_empty() {
            tracing::warn!(query, "No curated or generic facilities found");
        } else {
            tracing::info!(
                query,
                count = results.len(),
                from_catalog,
                "Facility lookup resolved"
            );
        }
        results
    }
}

impl Default for FacilityService {
    fn default() -> Self {
        Self::new(Arc::new(FacilityCatalog::curated()), ThirdEntryPolicy::default())
    }
}

impl FacilityLookup for FacilityService {
    async fn resolve_facilities(&self, query: &str) -> Vec<Facility> {
        self.resolve(query)
    }
}
