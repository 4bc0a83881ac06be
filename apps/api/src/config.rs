use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub resend_api_key: String,
    pub notify_from: String,
    pub notify_to: String,
    pub admin_name: String,
    pub admin_email: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            resend_api_key: require_env("RESEND_API_KEY")?,
            notify_from: env_or("NOTIFY_FROM", "Acme <onboarding@resend.dev>"),
            notify_to: env_or("NOTIFY_TO", "iqenglishmtymarketing@gmail.com"),
            admin_name: env_or("ADMIN_NAME", "Admin"),
            admin_email: env_or("ADMIN_EMAIL", "admin@iqenglish.mx"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
