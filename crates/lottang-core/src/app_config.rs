use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// Application configuration, loaded from environment variables by
/// [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,

    /// Desktop `store.do` endpoint base.
    pub desktop_base: String,
    /// Mobile `store.do` endpoint base.
    pub mobile_base: String,
    pub user_agent: String,
    pub accept_language: String,
    pub request_timeout_secs: u64,

    /// Pause window applied after each draw is fully processed.
    pub draw_pause_min_ms: u64,
    pub draw_pause_max_ms: u64,
    /// Pause window applied between archive listing pages.
    pub archive_pause_min_ms: u64,
    pub archive_pause_max_ms: u64,
    /// Pause window applied between store-directory pages.
    pub store_pause_min_ms: u64,
    pub store_pause_max_ms: u64,

    /// Default page bound for the archive listing fallback.
    pub archive_max_pages: u32,

    /// Where zero-yield response bodies are preserved for offline diagnosis.
    pub debug_dir: PathBuf,
    /// Region list driving the store-directory crawl.
    pub regions_path: PathBuf,

    /// Kakao Local REST key; required by the geocode pipeline only.
    pub kakao_rest_key: Option<String>,
    pub geocode_timeout_secs: u64,
    pub geocode_max_retries: u32,
    pub geocode_backoff_base_ms: u64,
    pub geocode_pause_min_ms: u64,
    pub geocode_pause_max_ms: u64,
    pub geocode_autosave_every: usize,
}
