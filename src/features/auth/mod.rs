//! Authentication: the session, login/logout, and role guards

pub mod dto;
pub mod guards;
pub mod model;
pub mod service;
pub mod session;

pub use guards::RouteGuard;
pub use model::{User, UserRole};
pub use service::AuthService;
pub use session::AuthSession;
