use crate::filters::types::{FilterField, FilterSet};
use tracing::debug;

/// In-progress edits that have not been committed to a search yet
#[derive(Debug, Clone, Default)]
pub struct PendingFilterStore {
    filters: FilterSet,
}

impl PendingFilterStore {
    pub fn new(seed: FilterSet) -> Self {
        Self { filters: seed }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Set `field` from raw form input, or make it absent when the input is
    /// falsy.
    ///
    /// Falsy means empty, unparseable, or numerically zero: writing `0` to a
    /// numeric field clears it rather than storing a minimum of zero.
    pub fn update_field(&mut self, field: FilterField, value: &str) {
        let stored = self.filters.set_raw(field, value);
        if stored && field.is_numeric() && is_zero(&self.filters, field) {
            self.filters.remove(field);
        }
        debug!(
            "Pending filter {} -> {:?}",
            field,
            self.filters.value_string(field)
        );
    }

    pub fn reset(&mut self) {
        self.filters = FilterSet::default();
    }

    pub fn snapshot(&self) -> FilterSet {
        self.filters.clone()
    }
}

fn is_zero(filters: &FilterSet, field: FilterField) -> bool {
    match field {
        FilterField::Bedrooms => filters.bedrooms == Some(0),
        FilterField::Bathrooms => filters.bathrooms == Some(0),
        FilterField::PriceMin => filters.price_min == Some(0.0),
        FilterField::PriceMax => filters.price_max == Some(0.0),
        FilterField::SizeMin => filters.size_min == Some(0.0),
        FilterField::SizeMax => filters.size_max == Some(0.0),
        FilterField::Type | FilterField::Status | FilterField::Location => false,
    }
}

/// The filter set that drove the most recent search.
///
/// Every replacement bumps `revision`; each revision corresponds to exactly
/// one dispatched search.
#[derive(Debug, Clone, Default)]
pub struct AppliedFilterStore {
    filters: FilterSet,
    revision: u64,
}

impl AppliedFilterStore {
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Commit a pending snapshot in one step.
    pub fn apply(&mut self, snapshot: FilterSet) -> &FilterSet {
        self.filters = snapshot;
        self.revision += 1;
        &self.filters
    }
}

/// Pending and applied stores, updated together for `clear`.
#[derive(Debug, Clone, Default)]
pub struct FilterStores {
    pub pending: PendingFilterStore,
    pub applied: AppliedFilterStore,
}

impl FilterStores {
    pub fn seeded(seed: FilterSet) -> Self {
        Self {
            pending: PendingFilterStore::new(seed),
            applied: AppliedFilterStore::default(),
        }
    }

    /// Copy pending into applied and return the set to search with.
    pub fn apply(&mut self) -> FilterSet {
        let snapshot = self.pending.snapshot();
        self.applied.apply(snapshot).clone()
    }

    /// Reset both stores to the unconstrained set.
    pub fn clear(&mut self) -> FilterSet {
        self.pending.reset();
        self.applied.apply(FilterSet::default()).clone()
    }
}
