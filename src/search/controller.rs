use crate::filters::{decode, encode, FilterField, FilterSet, FilterStores};
use crate::search::executor::{SearchExecutor, SearchResult, SearchState, SearchTicket};
use std::sync::Arc;
use tracing::info;

/// A search that has been dispatched but not yet executed.
///
/// Running it may be deferred or interleaved with later searches; only the
/// newest one publishes its result.
#[must_use = "a dispatched search does nothing until it is run"]
pub struct SearchHandle {
    executor: Arc<SearchExecutor>,
    ticket: SearchTicket,
}

impl SearchHandle {
    pub fn filters(&self) -> &FilterSet {
        &self.ticket.filters
    }

    /// Returns whether this search's result became the visible one.
    pub async fn run(self) -> bool {
        self.executor.run(self.ticket).await
    }
}

/// Filter reconciliation for the property listings view
pub struct ListingsController {
    stores: FilterStores,
    executor: Arc<SearchExecutor>,
    had_any_query: bool,
}

impl ListingsController {
    /// Seed both stores from the address-bar query and dispatch the initial search.
    ///
    /// Without any recognized parameter the initial search is unfiltered.
    pub fn mount(query: &str, executor: Arc<SearchExecutor>) -> (Self, SearchHandle) {
        let decoded = decode(query);
        info!(
            "Mounting listings view ({})",
            if decoded.had_any_query {
                "scoped by query"
            } else {
                "all listings"
            }
        );

        let mut controller = Self {
            stores: FilterStores::seeded(decoded.filters),
            executor,
            had_any_query: decoded.had_any_query,
        };
        let initial = controller.stores.apply();
        let handle = controller.dispatch(initial);
        (controller, handle)
    }

    fn dispatch(&self, filters: FilterSet) -> SearchHandle {
        SearchHandle {
            ticket: self.executor.dispatch(filters),
            executor: self.executor.clone(),
        }
    }

    pub fn had_any_query(&self) -> bool {
        self.had_any_query
    }

    pub fn pending(&self) -> &FilterSet {
        self.stores.pending.filters()
    }

    pub fn applied(&self) -> &FilterSet {
        self.stores.applied.filters()
    }

    /// Edit one pending field from raw form input. Does not search.
    pub fn update_field(&mut self, field: FilterField, value: &str) {
        self.stores.pending.update_field(field, value);
    }

    /// Commit pending edits and dispatch a search for them.
    pub fn apply(&mut self) -> SearchHandle {
        let filters = self.stores.apply();
        info!("Applying filters: {}", encode(&filters));
        self.dispatch(filters)
    }

    /// Drop every constraint and dispatch an unfiltered search.
    pub fn clear(&mut self) -> SearchHandle {
        info!("Clearing all filters");
        let filters = self.stores.clear();
        self.dispatch(filters)
    }

    /// Fields the filter panel should show for the pending selection.
    pub fn visible_fields(&self) -> Vec<FilterField> {
        let pending = self.stores.pending.filters();
        FilterField::ALL
            .into_iter()
            .filter(|field| pending.is_applicable(*field))
            .collect()
    }

    /// Query string reflecting the applied filters, with a leading `?`
    /// unless no filter is applied.
    pub fn address_bar(&self) -> String {
        let query = encode(self.stores.applied.filters());
        if query.is_empty() {
            query
        } else {
            format!("?{}", query)
        }
    }

    pub fn state(&self) -> SearchState {
        self.executor.state()
    }

    pub fn result(&self) -> SearchResult {
        self.executor.result()
    }

    /// Leave the view. Searches still in flight finish without effect.
    pub fn unmount(self) {
        self.executor.abandon();
    }
}
