//! Public service guides: requirements and steps for village paperwork

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{ServiceCategory, ServiceGuide, ServiceGuideFlag};
pub use params::ServiceGuideParams;
pub use service::ServiceGuideService;
