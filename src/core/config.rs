use crate::auth::JwtConfig;

/// Default bootstrap password, expected to be overridden in production
pub const DEFAULT_SUPER_ADMIN_PASSWORD: &str = "mudar-esta-senha";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/hourbank | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SUPER_ADMIN_EMAIL | ti@arcaplast.com.br | Email promoted to ADMIN on provisioning |
/// | SUPER_ADMIN_PASSWORD | (insecure default) | Bootstrap password for the super admin |
/// | DEFAULT_COMPANY | Arca Plast | Company assigned to auto-provisioned profiles |
/// | JWT_SECRET | generated in dev | Token signing secret (required in release) |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/hourbank HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Email auto-promoted to ADMIN when its profile is provisioned
    pub super_admin_email: String,
    /// Bootstrap password for the super admin profile
    pub super_admin_password: String,
    /// Company assigned to auto-provisioned profiles
    pub default_company: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults where unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hourbank".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            super_admin_email: std::env::var("SUPER_ADMIN_EMAIL")
                .unwrap_or_else(|_| "ti@arcaplast.com.br".into())
                .to_lowercase(),
            super_admin_password: std::env::var("SUPER_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_SUPER_ADMIN_PASSWORD.into()),
            default_company: std::env::var("DEFAULT_COMPANY")
                .unwrap_or_else(|_| "Arca Plast".into()),
        }
    }
}
