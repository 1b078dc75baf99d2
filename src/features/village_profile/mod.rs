//! Village profile page sections

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{VillageProfile, VillageProfileFlag};
pub use params::VillageProfileParams;
pub use service::VillageProfileService;
