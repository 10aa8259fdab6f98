//! Hour Bank Server - banco de horas backend
//!
//! Time-and-attendance occurrence tracking with signed hour balances.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/        # configuration, state, server lifecycle
//! ├── auth/        # JWT authentication, role gates
//! ├── db/          # embedded SurrealDB, models, repositories
//! ├── occurrence/  # classification table, duration calculator
//! ├── balance/     # balance fold and formatting
//! ├── api/         # HTTP routes and handlers
//! └── utils/       # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod balance;
pub mod core;
pub mod db;
pub mod occurrence;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __  __                      ____              __
   / / / /___  __  ______      / __ )____ _____  / /__
  / /_/ / __ \/ / / / ___/____/ __  / __ `/ __ \/ //_/
 / __  / /_/ / /_/ / /  /____/ /_/ / /_/ / / / / ,<
/_/ /_/\____/\__,_/_/       /_____/\__,_/_/ /_/_/|_|
    "#
    );
}
