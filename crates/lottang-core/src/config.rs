use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_DESKTOP_BASE: &str = "https://www.dhlottery.co.kr/store.do";
const DEFAULT_MOBILE_BASE: &str = "https://m.dhlottery.co.kr/store.do";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or a pause window is
/// inverted. No env var is hard-required at load time; the Kakao REST key is
/// checked by the geocode pipeline before any work starts.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Same conditions as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let pause_window = |min_var: &str,
                        min_default: &str,
                        max_var: &str,
                        max_default: &str|
     -> Result<(u64, u64), ConfigError> {
        let min = parse_u64(min_var, min_default)?;
        let max = parse_u64(max_var, max_default)?;
        if min > max {
            return Err(ConfigError::Validation(format!(
                "{min_var} ({min}) must not exceed {max_var} ({max})"
            )));
        }
        Ok((min, max))
    };

    let env = parse_environment(&or_default("LOTTANG_ENV", "development"));
    let log_level = or_default("LOTTANG_LOG_LEVEL", "info");

    let desktop_base = or_default("LOTTANG_DESKTOP_BASE", DEFAULT_DESKTOP_BASE);
    let mobile_base = or_default("LOTTANG_MOBILE_BASE", DEFAULT_MOBILE_BASE);
    let user_agent = or_default("LOTTANG_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("LOTTANG_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);
    let request_timeout_secs = parse_u64("LOTTANG_REQUEST_TIMEOUT_SECS", "15")?;

    let (draw_pause_min_ms, draw_pause_max_ms) = pause_window(
        "LOTTANG_DRAW_PAUSE_MIN_MS",
        "600",
        "LOTTANG_DRAW_PAUSE_MAX_MS",
        "1100",
    )?;
    let (archive_pause_min_ms, archive_pause_max_ms) = pause_window(
        "LOTTANG_ARCHIVE_PAUSE_MIN_MS",
        "250",
        "LOTTANG_ARCHIVE_PAUSE_MAX_MS",
        "500",
    )?;
    let (store_pause_min_ms, store_pause_max_ms) = pause_window(
        "LOTTANG_STORE_PAUSE_MIN_MS",
        "700",
        "LOTTANG_STORE_PAUSE_MAX_MS",
        "1300",
    )?;

    let archive_max_pages = parse_u32("LOTTANG_ARCHIVE_MAX_PAGES", "120")?;

    let debug_dir = PathBuf::from(or_default("LOTTANG_DEBUG_DIR", "data/debug"));
    let regions_path = PathBuf::from(or_default("LOTTANG_REGIONS_PATH", "./config/regions.yaml"));

    // Either name is accepted to match how deployments have stored the secret.
    let kakao_rest_key = lookup("KAKAO_REST_API_KEY")
        .or_else(|_| lookup("KAKAO_REST_KEY"))
        .ok();

    let geocode_timeout_secs = parse_u64("LOTTANG_GEOCODE_TIMEOUT_SECS", "12")?;
    let geocode_max_retries = parse_u32("LOTTANG_GEOCODE_MAX_RETRIES", "3")?;
    let geocode_backoff_base_ms = parse_u64("LOTTANG_GEOCODE_BACKOFF_BASE_MS", "1500")?;
    let (geocode_pause_min_ms, geocode_pause_max_ms) = pause_window(
        "LOTTANG_GEOCODE_PAUSE_MIN_MS",
        "350",
        "LOTTANG_GEOCODE_PAUSE_MAX_MS",
        "700",
    )?;
    let geocode_autosave_every = parse_usize("LOTTANG_GEOCODE_AUTOSAVE_EVERY", "100")?;

    Ok(AppConfig {
        env,
        log_level,
        desktop_base,
        mobile_base,
        user_agent,
        accept_language,
        request_timeout_secs,
        draw_pause_min_ms,
        draw_pause_max_ms,
        archive_pause_min_ms,
        archive_pause_max_ms,
        store_pause_min_ms,
        store_pause_max_ms,
        archive_max_pages,
        debug_dir,
        regions_path,
        kakao_rest_key,
        geocode_timeout_secs,
        geocode_max_retries,
        geocode_backoff_base_ms,
        geocode_pause_min_ms,
        geocode_pause_max_ms,
        geocode_autosave_every,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
