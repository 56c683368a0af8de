//! Runtime configuration, read from the environment (and `.env` when present).

use di::{inject, injectable};
use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    /// Time the scripted assistant "thinks" before replying.
    pub reply_delay: Duration,
    pub upload_delay: Duration,
    pub poster_delay: Duration,
    pub video_delay: Duration,
    /// Probability in `[0, 1]` that a simulated job succeeds.
    pub success_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            reply_delay: Duration::from_millis(1500),
            upload_delay: Duration::from_millis(2000),
            poster_delay: Duration::from_millis(3000),
            video_delay: Duration::from_millis(5000),
            success_rate: 0.8,
        }
    }
}

#[injectable]
impl AppConfig {
    #[inject]
    pub fn create() -> AppConfig {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl AppConfig {
    /// Builds a config from any key lookup. Missing or malformed values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
        let defaults = AppConfig::default();

        let success_rate = parse_or(&lookup, "SIMULATION_SUCCESS_RATE", defaults.success_rate);
        let success_rate = if (0.0..=1.0).contains(&success_rate) {
            success_rate
        } else {
            warn!("SIMULATION_SUCCESS_RATE={success_rate} is outside [0, 1], using default");
            defaults.success_rate
        };

        AppConfig {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| split_origins(&s))
                .unwrap_or(defaults.allowed_origins),
            reply_delay: millis_or(&lookup, "REPLY_DELAY_MS", defaults.reply_delay),
            upload_delay: millis_or(&lookup, "UPLOAD_DELAY_MS", defaults.upload_delay),
            poster_delay: millis_or(&lookup, "POSTER_DELAY_MS", defaults.poster_delay),
            video_delay: millis_or(&lookup, "VIDEO_DELAY_MS", defaults.video_delay),
            success_rate,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("invalid value for {key}: {raw:?}, using default");
            default
        }),
    }
}

fn millis_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(parse_or(lookup, key, default_ms))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
