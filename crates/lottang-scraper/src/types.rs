//! Scraper-side configuration and strategy identifiers.

use lottang_core::AppConfig;

/// Query parameters selecting the winning-store view on `store.do`.
pub(crate) const TOP_STORE_QUERY: &[(&str, &str)] = &[("method", "topStore"), ("pageGubun", "L645")];

/// Everything the fetch pipeline needs to talk to the lottery site.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub desktop_base: String,
    pub mobile_base: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    /// Page bound for the archive listing fallback.
    pub archive_max_pages: u32,
    /// Pause window between archive listing pages.
    pub archive_pause_min_ms: u64,
    pub archive_pause_max_ms: u64,
}

impl ScrapeConfig {
    #[must_use]
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            desktop_base: config.desktop_base.clone(),
            mobile_base: config.mobile_base.clone(),
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            timeout_secs: config.request_timeout_secs,
            archive_max_pages: config.archive_max_pages,
            archive_pause_min_ms: config.archive_pause_min_ms,
            archive_pause_max_ms: config.archive_pause_max_ms,
        }
    }

    /// Referer the desktop session warms up against.
    #[must_use]
    pub fn desktop_referer(&self) -> String {
        format!("{}?method=topStore&pageGubun=L645", self.desktop_base)
    }

    /// Referer the mobile session warms up against. Device variants carry
    /// separate cookies, so this is a distinct session origin.
    #[must_use]
    pub fn mobile_referer(&self) -> String {
        format!("{}?method=topStore&pageGubun=L645", self.mobile_base)
    }
}

/// One attempt in the ordered fetch ladder for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DesktopPost,
    MobilePost,
    DesktopGet,
    Archive,
}

impl Strategy {
    /// Stable tag used in logs and debug-dump file names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Strategy::DesktopPost => "detail_post_desktop",
            Strategy::MobilePost => "detail_post_mobile",
            Strategy::DesktopGet => "detail_get_desktop",
            Strategy::Archive => "archive",
        }
    }
}
