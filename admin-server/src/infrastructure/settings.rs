use anyhow::{Context, Result, anyhow};

use crate::infrastructure::token::TokenMode;

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub jwt_secret: String,
    pub token_mode: TokenMode,
    pub token_ttl_seconds: i64,
    pub token_ttl_extended_seconds: i64,
    pub admin_email: String,
    pub admin_password: String,
    pub public_base_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let admin_email = get_required("ADMIN_EMAIL").context("ADMIN_EMAIL is required")?;
        let admin_password = get_required("ADMIN_PASSWORD").context("ADMIN_PASSWORD is required")?;
        if admin_password.chars().count() < 8 {
            return Err(anyhow!("ADMIN_PASSWORD must be at least 8 characters"));
        }

        let token_mode_raw =
            std::env::var("TOKEN_MODE").unwrap_or_else(|_| "signed".to_string());
        let token_mode = TokenMode::parse(&token_mode_raw)
            .ok_or_else(|| anyhow!("TOKEN_MODE must be 'signed' or 'opaque'"))?;
        let token_ttl_seconds = parse_positive_i64_env("TOKEN_TTL_SECONDS", 24 * 60 * 60)?;
        let token_ttl_extended_seconds =
            parse_positive_i64_env("TOKEN_TTL_EXTENDED_SECONDS", 30 * 24 * 60 * 60)?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 10 * 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        // empty base keeps upload URLs relative, as served behind a proxy
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            http_addr,
            log_level,
            cors_origins,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            jwt_secret,
            token_mode,
            token_ttl_seconds,
            token_ttl_extended_seconds,
            admin_email,
            admin_password,
            public_base_url,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_positive_i64_env(key: &str, default: i64) -> Result<i64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<i64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value <= 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
