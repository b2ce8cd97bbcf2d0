use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub lending: LendingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let cors_origins = parse_cors_origins(&env::var("APP_CORS_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                cors_origins,
            },
            telemetry: TelemetryConfig { log_level },
            lending: LendingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Comma-separated origin list; every entry must be a valid header value.
fn parse_cors_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.to_string())
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
        })
        .collect()
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credit modifiers for the three scoring segments. Applicants below the
/// first segment always receive a modifier of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentModifiers {
    pub tier_1: u32,
    pub tier_2: u32,
    pub tier_3: u32,
}

/// Lending bounds and scoring constants shared by every decision.
#[derive(Debug, Clone, PartialEq)]
pub struct LendingConfig {
    pub min_amount: i64,
    pub max_amount: i64,
    pub amount_step: i64,
    pub min_period: i32,
    pub max_period: i32,
    pub segments: SegmentModifiers,
    pub min_credit_score: f64,
    pub score_divisor: f64,
    pub min_age: i32,
    pub life_expectancy: i32,
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            min_amount: 2_000,
            max_amount: 10_000,
            amount_step: 100,
            min_period: 12,
            max_period: 48,
            segments: SegmentModifiers {
                tier_1: 100,
                tier_2: 300,
                tier_3: 1_000,
            },
            min_credit_score: 0.1,
            score_divisor: 10.0,
            min_age: 18,
            life_expectancy: 80,
        }
    }
}

impl LendingConfig {
    /// Build the lending surface from `LOAN_*` variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            min_amount: env_or("LOAN_MIN_AMOUNT", defaults.min_amount)?,
            max_amount: env_or("LOAN_MAX_AMOUNT", defaults.max_amount)?,
            amount_step: env_or("LOAN_AMOUNT_STEP", defaults.amount_step)?,
            min_period: env_or("LOAN_MIN_PERIOD", defaults.min_period)?,
            max_period: env_or("LOAN_MAX_PERIOD", defaults.max_period)?,
            segments: SegmentModifiers {
                tier_1: env_or("LOAN_SEGMENT_1_MODIFIER", defaults.segments.tier_1)?,
                tier_2: env_or("LOAN_SEGMENT_2_MODIFIER", defaults.segments.tier_2)?,
                tier_3: env_or("LOAN_SEGMENT_3_MODIFIER", defaults.segments.tier_3)?,
            },
            min_credit_score: env_or("LOAN_MIN_CREDIT_SCORE", defaults.min_credit_score)?,
            score_divisor: env_or("LOAN_SCORE_DIVISOR", defaults.score_divisor)?,
            min_age: env_or("LOAN_MIN_AGE", defaults.min_age)?,
            life_expectancy: env_or("LOAN_LIFE_EXPECTANCY", defaults.life_expectancy)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject bounds the decision search cannot run against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_amount > self.max_amount {
            return Err(ConfigError::InconsistentLending(
                "LOAN_MIN_AMOUNT must not exceed LOAN_MAX_AMOUNT",
            ));
        }
        if self.amount_step <= 0 {
            return Err(ConfigError::InconsistentLending(
                "LOAN_AMOUNT_STEP must be positive",
            ));
        }
        if self.min_period > self.max_period {
            return Err(ConfigError::InconsistentLending(
                "LOAN_MIN_PERIOD must not exceed LOAN_MAX_PERIOD",
            ));
        }
        if self.min_amount <= 0 || self.min_period <= 0 {
            return Err(ConfigError::InconsistentLending(
                "loan amount and period bounds must be positive",
            ));
        }
        let SegmentModifiers {
            tier_1,
            tier_2,
            tier_3,
        } = self.segments;
        if tier_1 == 0 || tier_2 == 0 || tier_3 == 0 {
            return Err(ConfigError::InconsistentLending(
                "segment modifiers must be positive",
            ));
        }
        if !self.score_divisor.is_finite() || self.score_divisor <= 0.0 {
            return Err(ConfigError::InconsistentLending(
                "LOAN_SCORE_DIVISOR must be a positive finite number",
            ));
        }
        if !self.min_credit_score.is_finite() {
            return Err(ConfigError::InconsistentLending(
                "LOAN_MIN_CREDIT_SCORE must be a finite number",
            ));
        }
        if self.max_age() < self.min_age {
            return Err(ConfigError::InconsistentLending(
                "LOAN_LIFE_EXPECTANCY leaves no eligible age at or above LOAN_MIN_AGE",
            ));
        }
        Ok(())
    }

    /// Oldest age an applicant may be while still repaying the longest loan.
    pub fn max_age(&self) -> i32 {
        self.life_expectancy - self.max_period / 12
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidLending { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLending { key: &'static str, value: String },
    InconsistentLending(&'static str),
    InvalidCorsOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLending { key, value } => {
                write!(f, "{key} has an unparsable value '{value}'")
            }
            ConfigError::InconsistentLending(reason) => {
                write!(f, "invalid lending configuration: {reason}")
            }
            ConfigError::InvalidCorsOrigin(origin) => {
                write!(f, "APP_CORS_ORIGINS entry '{origin}' is not a valid origin")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLending { .. }
            | ConfigError::InconsistentLending(_)
            | ConfigError::InvalidCorsOrigin(_) => None,
        }
    }
}
