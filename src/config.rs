/*
 * Responsibility
 * - Read environment variables (PORT, JWT secret, token TTL, CORS, public paths)
 * - Validate values up front (missing or invalid settings abort startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

// Development fallback only; production must set JWT_SECRET.
const DEV_JWT_SECRET: &str = "your-secret-key";

const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/unauthorized",
    "/health",
    "/swagger-ui.html",
    "/swagger-ui/**",
    "/api-docs/**",
    "/api-docs.yaml",
    "/v3/api-docs/**",
    "/swagger-resources/**",
    "/webjars/**",
];

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // HMAC-SHA-256 signing key
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,

    // Patterns that bypass authentication, in match order
    pub public_paths: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("public_paths", &self.public_paths)
            .finish_non_exhaustive()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let cors_allowed_origins = split_list(&get("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) if secret.is_empty() => return Err(ConfigError::Invalid("JWT_SECRET")),
            Some(secret) => secret,
            None if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => DEV_JWT_SECRET.to_string(),
        };

        let token_ttl_seconds = match get("TOKEN_TTL_SECONDS") {
            Some(s) => match s.parse::<u64>() {
                Ok(v) if v > 0 => v,
                _ => return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS")),
            },
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let public_paths = match get("AUTH_PUBLIC_PATHS") {
            Some(s) => split_list(&s),
            None => DEFAULT_PUBLIC_PATHS.iter().map(|s| s.to_string()).collect(),
        };
        if public_paths.iter().any(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid("AUTH_PUBLIC_PATHS"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            token_ttl_seconds,
            public_paths,
        })
    }
}
