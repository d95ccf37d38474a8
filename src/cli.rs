//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::db::{Database, UserRole};
use crate::jwt::LifetimePolicy;
use crate::service::hash_password;
use clap::Parser;
use std::time::Duration;
use tracing::{error, info};

const MIN_JWT_SECRET_LENGTH: usize = 32;
const HOUR_SECS: u64 = 60 * 60;
const DAY_SECS: u64 = 24 * HOUR_SECS;
/// Roughly a thousand years; longer lifetimes would push `exp` out of range.
const MAX_LIFETIME_SECS: u64 = 1000 * 366 * DAY_SECS;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "Quillpost", about = "Blog articles with JWT authentication")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Path to SQLite database file
    #[arg(short, long, default_value = "quillpost.db")]
    pub database: String,

    /// Path to file containing JWT secret. Prefer using JWT_SECRET env var instead
    #[arg(long)]
    pub jwt_secret_file: Option<String>,

    /// Issuer stamped into and required from every token
    #[arg(long, env = "JWT_ISSUER", default_value = "quillpost")]
    pub jwt_issuer: String,

    /// Lifetime of access tokens issued at login, in hours
    #[arg(long, default_value = "24", value_parser = clap::value_parser!(u64).range(1..))]
    pub access_token_hours: u64,

    /// Lifetime of refresh tokens, in days
    #[arg(long, default_value = "14", value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_token_days: u64,

    /// Longest lifetime any token may be issued with, in days.
    /// Defaults to the longer of the access and refresh lifetimes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_token_days: Option<u64>,

    /// Create (or promote) an admin user with this email on startup.
    /// The password is read from the ADMIN_PASSWORD env var
    #[arg(long)]
    pub create_admin: Option<String>,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load JWT secret from environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_jwt_secret(jwt_secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("JWT_SECRET") {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("JWT_SECRET") };
        secret
    } else if let Some(path) = jwt_secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read JWT secret file");
                return None;
            }
        }
    } else {
        error!(
            "JWT secret is required. Set JWT_SECRET environment variable (recommended) or use --jwt-secret-file"
        );
        return None;
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        error!(
            "JWT secret is shorter than {} characters. Use a longer secret",
            MIN_JWT_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

/// Build the token lifetime policy from arguments.
/// Returns None and logs an error if a lifetime overflows or exceeds the maximum.
pub fn build_lifetime_policy(
    access_token_hours: u64,
    refresh_token_days: u64,
    max_token_days: Option<u64>,
) -> Option<LifetimePolicy> {
    let access = lifetime_secs(access_token_hours, HOUR_SECS, "--access-token-hours")?;
    let refresh = lifetime_secs(refresh_token_days, DAY_SECS, "--refresh-token-days")?;
    let max = match max_token_days {
        Some(days) => lifetime_secs(days, DAY_SECS, "--max-token-days")?,
        None => access.max(refresh),
    };

    if access > max || refresh > max {
        error!(
            access_secs = access.as_secs(),
            refresh_secs = refresh.as_secs(),
            max_secs = max.as_secs(),
            "Token lifetimes must not exceed --max-token-days"
        );
        return None;
    }

    Some(LifetimePolicy {
        access,
        refresh,
        max,
    })
}

/// Convert a count of hours or days to a lifetime, rejecting values whose
/// seconds do not fit in a Unix timestamp.
fn lifetime_secs(count: u64, unit_secs: u64, flag: &str) -> Option<Duration> {
    match count.checked_mul(unit_secs).filter(|&secs| secs <= MAX_LIFETIME_SECS) {
        Some(secs) => Some(Duration::from_secs(secs)),
        None => {
            error!(flag, value = count, "Token lifetime is too large");
            None
        }
    }
}

/// Handle the --create-admin flag: create a new admin or promote an existing user.
pub async fn handle_create_admin(db: &Database, email: &str) {
    match db.users().get_by_email(email).await {
        Ok(Some(existing)) => {
            if let Err(e) = db.users().set_role(existing.id, UserRole::Admin).await {
                error!(error = %e, "Failed to promote admin user");
                std::process::exit(1);
            }
            info!(user_id = existing.id, "Existing user promoted to admin");
        }
        Ok(None) => {
            let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
                error!("ADMIN_PASSWORD is required to create a new admin user");
                std::process::exit(1);
            };
            // SAFETY: We're single-threaded at this point during startup.
            unsafe { std::env::remove_var("ADMIN_PASSWORD") };

            let hash = match hash_password(&password) {
                Ok(hash) => hash,
                Err(e) => {
                    error!(error = %e, "Failed to hash admin password");
                    std::process::exit(1);
                }
            };

            match db
                .users()
                .create_with_role(email, &hash, UserRole::Admin)
                .await
            {
                Ok(id) => info!(user_id = id, "Admin user created"),
                Err(e) => {
                    error!(error = %e, "Failed to create admin user");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Failed to check for existing admin");
            std::process::exit(1);
        }
    }
}

/// Build ServerConfig from validated arguments.
pub fn build_config(
    db: Database,
    jwt_secret: String,
    jwt_issuer: String,
    token_lifetimes: LifetimePolicy,
) -> ServerConfig {
    ServerConfig {
        db,
        jwt_secret: jwt_secret.into_bytes(),
        jwt_issuer,
        token_lifetimes,
    }
}

/// Open the database, logging errors if it fails.
pub async fn open_database(path: &str) -> Option<Database> {
    match Database::open(path).await {
        Ok(db) => {
            info!(path = %path, "Database opened");
            Some(db)
        }
        Err(e) => {
            error!(path = %path, error = %e, "Failed to open database");
            None
        }
    }
}
