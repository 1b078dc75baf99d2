//! One module per backend resource, plus auth and uploads

pub mod auth;
pub mod contacts;
pub mod events;
pub mod posts;
pub mod service_guides;
pub mod umkm;
pub mod uploads;
pub mod users;
pub mod village_profile;
