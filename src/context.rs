//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;

/// App-wide settings and triggers provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Runtime configuration read at startup
    pub config: StoredValue<AppConfig>,
    /// Trigger to refetch notifications - read
    pub notify_trigger: ReadSignal<u32>,
    /// Trigger to refetch notifications - write
    set_notify_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, notify_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            config: StoredValue::new(config),
            notify_trigger: notify_trigger.0,
            set_notify_trigger: notify_trigger.1,
        }
    }

    /// Trigger a refetch of notifications
    pub fn refresh_notifications(&self) {
        self.set_notify_trigger.update(|v| *v += 1);
    }

    pub fn api(&self) -> ApiClient {
        self.config.with_value(ApiClient::from_config)
    }

    pub fn user_id(&self) -> Option<String> {
        self.config.with_value(|c| c.user_id.clone())
    }

    pub fn toast_duration_ms(&self) -> u32 {
        self.config.with_value(|c| c.toast_duration_ms)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_notifications_bumps_trigger() {
        let ctx = AppContext::new(AppConfig::default(), signal(0));
        ctx.refresh_notifications();
        ctx.refresh_notifications();
        assert_eq!(ctx.notify_trigger.get_untracked(), 2);
    }
}
