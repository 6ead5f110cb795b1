use crate::error::SyncError;

pub const DEFAULT_SCHEDULE_API_BASE: &str = "https://api.jolpi.ca/ergast";
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";
pub const DEFAULT_ICON: &str = "🏎️";
pub const DEFAULT_ENRICHMENT_PROPERTY: &str = "Last Year";
pub const DEFAULT_SYNC_KEY_PROPERTY: &str = "Sync Key";

/// Process-wide settings, read once at startup and shared read-only for the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub notion_token: String,
    pub database_id: String,
    pub schedule_api_base: String,
    pub notion_api_base: String,
    pub cover_url: Option<String>,
    pub icon: Option<String>,
    pub enrichment_property: String,
    pub sync_key_property: String,
}

impl Config {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            non_empty(key).ok_or_else(|| SyncError::Config(format!("{key} must be set")))
        };

        let icon = match lookup("NOTION_ICON") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v),
            None => Some(DEFAULT_ICON.to_string()),
        };

        Ok(Config {
            notion_token: required("NOTION_TOKEN")?,
            database_id: required("DATABASE_ID")?,
            schedule_api_base: non_empty("SCHEDULE_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SCHEDULE_API_BASE.to_string()),
            notion_api_base: non_empty("NOTION_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_NOTION_API_BASE.to_string()),
            cover_url: non_empty("NOTION_COVER_URL"),
            icon,
            enrichment_property: non_empty("ENRICHMENT_PROPERTY")
                .unwrap_or_else(|| DEFAULT_ENRICHMENT_PROPERTY.to_string()),
            sync_key_property: non_empty("SYNC_KEY_PROPERTY")
                .unwrap_or_else(|| DEFAULT_SYNC_KEY_PROPERTY.to_string()),
        })
    }
}
