//! Authentication and authorization module
//!
//! - [`JwtService`] - JWT token service
//! - [`CurrentUser`] - authenticated request context
//! - [`require_auth`] - authentication middleware
//! - [`require_admin`] / [`require_leader_or_admin`] - role gates

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_leader_or_admin};
