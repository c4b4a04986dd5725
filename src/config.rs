//! Runtime Configuration
//!
//! Read from JSON blocks the server renders into the page:
//! `<script id="app-config" type="application/json">`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::pagination::DEFAULT_PAGE_SIZE;

const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// REST base URL, empty = same origin
    pub api_base: String,
    /// Signed-in user; the notification poller stays idle without it
    pub user_id: Option<String>,
    /// Bearer token for the REST API
    pub token: Option<String>,
    pub page_size: usize,
    /// Badge refresh interval, 0 disables polling
    pub poll_interval_secs: u32,
    pub toast_duration_ms: u32,
    /// Decision form action; `{id}` is replaced with the dispute id
    pub decision_action: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            user_id: None,
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval_secs: 30,
            toast_duration_ms: 4000,
            decision_action: "/Admin/Compensation/Details/{id}".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfig = serde_json::from_str(raw)?;
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Load from the page, falling back to defaults
    pub fn load() -> Self {
        let Some(raw) = embedded_json_text(CONFIG_ELEMENT_ID) else {
            web_sys::console::warn_1(&"[CONFIG] No #app-config block, using defaults".into());
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::warn_1(&format!("[CONFIG] Invalid #app-config: {}", e).into());
                Self::default()
            }
        }
    }

    pub fn decision_action_for(&self, dispute_id: u32) -> String {
        self.decision_action.replace("{id}", &dispute_id.to_string())
    }
}

/// Text content of a `<script type="application/json">` block
fn embedded_json_text(element_id: &str) -> Option<String> {
    let doc = web_sys::window()?.document()?;
    doc.get_element_by_id(element_id)?.text_content()
}

/// Deserialize a server-rendered JSON block, `None` if absent or malformed
pub fn load_embedded_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
    let raw = embedded_json_text(element_id)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::error_1(&format!("[CONFIG] Invalid #{}: {}", element_id, e).into());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 8);
        assert_eq!(config.poll_interval_secs, 30);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_json(
            r#"{"apiBase":"https://api.example.com/","userId":"u-42","token":"abc","pageSize":0,"pollIntervalSecs":0}"#,
        ).unwrap();
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.user_id.as_deref(), Some("u-42"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.poll_interval_secs, 0);
        assert_eq!(config.toast_duration_ms, 4000);
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(AppConfig::from_json("{pageSize: 8").is_err());
        assert!(AppConfig::from_json(r#"{"pageSize":"eight"}"#).is_err());
    }

    #[test]
    fn test_decision_action_template() {
        let config = AppConfig::default();
        assert_eq!(config.decision_action_for(7), "/Admin/Compensation/Details/7");
    }
}
