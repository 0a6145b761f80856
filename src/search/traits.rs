use crate::filters::FilterSet;
use crate::models::Property;
use crate::search::error::SearchError;
use async_trait::async_trait;

/// Anything that can answer a listings query.
/// The HTTP client is the production implementation; tests substitute an in-memory one.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch properties matching `filters`. Absent fields are left unconstrained.
    async fn search(&self, filters: &FilterSet) -> Result<Vec<Property>, SearchError>;

    /// Get the name of the backend
    fn source_name(&self) -> &'static str;
}
