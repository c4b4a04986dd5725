//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{Dispute, Notification};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Server-rendered dispute list
    pub disputes: Vec<Dispute>,
    /// Notifications from the last list fetch, newest first
    pub notifications: Vec<Notification>,
    /// Badge count from the last unread-count fetch
    pub unread_count: u32,
}

impl AppState {
    pub fn new(disputes: Vec<Dispute>) -> Self {
        Self {
            disputes,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Flag one notification read, keeping the badge in step
pub fn store_mark_read(store: &AppStore, notification_id: u32) {
    let changed = store.notifications().write().iter_mut()
        .find(|n| n.id == notification_id && !n.is_read)
        .map(|n| n.is_read = true)
        .is_some();
    if changed {
        store.unread_count().update(|c| *c = c.saturating_sub(1));
    }
}

/// Flag every notification read and clear the badge
pub fn store_mark_all_read(store: &AppStore) {
    store.notifications().write().iter_mut().for_each(|n| n.is_read = true);
    store.unread_count().set(0);
}
