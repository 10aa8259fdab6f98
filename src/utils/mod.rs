//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - application error type and envelope
//! - [`AppResult`] - handler result alias
//! - logging and time helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
