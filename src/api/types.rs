//! Shared state for the API layer.

use std::sync::Arc;

use crate::pipeline::analysis::{ChatModel, SymptomAnalyzer};
use crate::pipeline::facilities::FacilityLookup;

/// Shared context for all API routes.
pub struct ApiContext<M: ChatModel, L: FacilityLookup> {
    pub analyzer: Arc<SymptomAnalyzer<M, L>>,
}

impl<M: ChatModel, L: FacilityLookup> ApiContext<M, L> {
    pub fn new(analyzer: Arc<SymptomAnalyzer<M, L>>) -> Self {
        Self { analyzer }
    }
}

// Manual impl: derive would require `M: Clone` and `L: Clone`.
impl<M: ChatModel, L: FacilityLookup> Clone for ApiContext<M, L> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}
