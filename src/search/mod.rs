pub mod client;
pub mod controller;
pub mod error;
pub mod executor;
pub mod traits;

pub use client::ListingsClient;
pub use controller::{ListingsController, SearchHandle};
pub use error::SearchError;
pub use executor::{SearchExecutor, SearchResult, SearchState, SearchTicket};
pub use traits::SearchBackend;
