//! UMKM directory: village small businesses, their products and opening hours

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{OperatingHours, Product, SocialMedia, Umkm, UmkmFlag};
pub use params::UmkmParams;
pub use service::UmkmService;
