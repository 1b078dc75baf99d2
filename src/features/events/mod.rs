//! Village events: agenda, registration windows and locations

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{Event, EventCategory, EventFlag};
pub use params::EventParams;
pub use service::EventService;
