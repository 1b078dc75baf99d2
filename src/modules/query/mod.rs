//! Client-side query cache: keyed results, staleness, retries, invalidation,
//! plus the observer and mutation handles UI code binds to.

mod client;
mod key;
mod mutation;
mod observer;
mod policy;

pub use client::QueryClient;
pub use key::{QueryFilter, QueryKey, QueryScope};
pub use mutation::Mutation;
pub use observer::{FetchMode, ObserverFetch, QueryObserver, QueryState};
pub use policy::QueryPolicy;
