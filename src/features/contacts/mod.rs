//! Village office directory

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{Contact, ContactFlag, ContactType};
pub use params::ContactParams;
pub use service::{group_contacts, ContactGroup, ContactService};
