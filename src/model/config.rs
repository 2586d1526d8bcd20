use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 700;
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

pub const SEARCH_DEBOUNCE_RANGE_MS: std::ops::RangeInclusive<u64> = 700..=1000;
pub const PAGE_LIMIT_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    pub base_url: String,

    /// Rows requested per list page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Quiet period before a search box triggers a refetch.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Role the profile endpoint must report for the session to be accepted.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_admin_role() -> String {
    DEFAULT_ADMIN_ROLE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.version != 1 {
            anyhow::bail!("unsupported config version {}", self.version);
        }
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https:// (got `{}`)", url);
        }
        if !PAGE_LIMIT_RANGE.contains(&self.page_limit) {
            anyhow::bail!(
                "page_limit must be within {}..={} (got {})",
                PAGE_LIMIT_RANGE.start(),
                PAGE_LIMIT_RANGE.end(),
                self.page_limit
            );
        }
        if !SEARCH_DEBOUNCE_RANGE_MS.contains(&self.search_debounce_ms) {
            anyhow::bail!(
                "search_debounce_ms must be within {}..={} (got {})",
                SEARCH_DEBOUNCE_RANGE_MS.start(),
                SEARCH_DEBOUNCE_RANGE_MS.end(),
                self.search_debounce_ms
            );
        }
        if self.admin_role.trim().is_empty() {
            anyhow::bail!("admin_role must not be empty");
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
    }
}

/// Mutable client state; holds the auth session apart from config.json.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Base URL the token was issued by; a token is not sent to other hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_base_url: Option<String>,
}
