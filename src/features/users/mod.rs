//! Admin panel accounts. The entity is the same [`User`] the session holds.
//!
//! [`User`]: crate::features::auth::model::User

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::UserFlag;
pub use params::UserParams;
pub use service::UserService;
