pub mod codec;
pub mod store;
pub mod types;

pub use codec::{decode, encode, DecodedQuery};
pub use store::{AppliedFilterStore, FilterStores, PendingFilterStore};
pub use types::{FilterField, FilterSet};
