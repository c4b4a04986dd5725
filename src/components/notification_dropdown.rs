//! Notification Dropdown Component
//!
//! Bell with unread badge. Opening it or pressing refresh fetches the count
//! and the list; the badge also refreshes on the configured poll interval.

use chrono::DateTime;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_toast::use_toasts;

use crate::api;
use crate::context::{use_app_context, AppContext};
use crate::models::{format_relative, parse_timestamp, Notification};
use crate::store::{store_mark_all_read, store_mark_read, use_app_store, AppStateStoreFields, AppStore};

/// How often relative times are recomputed while the panel is open
const CLOCK_TICK_MS: u32 = 30_000;

/// Badge text, capped so it fits the bell
fn badge_text(count: u32) -> String {
    if count > 99 { "99+".to_string() } else { count.to_string() }
}

/// Relative time label for a notification, raw text when unparseable
fn relative_time(created_at: &str, now_ms: i64) -> String {
    match (parse_timestamp(created_at), DateTime::from_timestamp_millis(now_ms)) {
        (Some(then), Some(now)) => format_relative(then, now),
        _ => created_at.to_string(),
    }
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn refresh_count(ctx: AppContext, store: AppStore) {
    let Some(user_id) = ctx.user_id() else { return };
    let client = ctx.api();
    spawn_local(async move {
        match api::fetch_unread_count(&client, &user_id).await {
            Ok(count) => store.unread_count().set(count),
            Err(e) => web_sys::console::error_1(&format!("[NOTIFY] Unread count failed: {}", e).into()),
        }
    });
}

fn refresh_list(ctx: AppContext, store: AppStore, set_loading: WriteSignal<bool>) {
    let Some(user_id) = ctx.user_id() else { return };
    let client = ctx.api();
    set_loading.set(true);
    spawn_local(async move {
        match api::fetch_notifications(&client, &user_id).await {
            Ok(list) => {
                web_sys::console::log_1(&format!("[NOTIFY] Loaded {} notifications", list.len()).into());
                store.notifications().set(list);
            }
            Err(e) => web_sys::console::error_1(&format!("[NOTIFY] List failed: {}", e).into()),
        }
        set_loading.set(false);
    });
}

/// Notification bell and dropdown
#[component]
pub fn NotificationDropdown() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let toasts = use_toasts();
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (clock, set_clock) = signal(now_ms());

    // Count on mount and on every refresh request; list only while open
    Effect::new(move |_| {
        let _ = ctx.notify_trigger.get();
        refresh_count(ctx, store);
        if open.get_untracked() {
            refresh_list(ctx, store, set_loading);
        }
    });

    let interval_secs = ctx.config.with_value(|c| c.poll_interval_secs);
    if interval_secs > 0 && ctx.user_id().is_some() {
        let poller = Interval::new(interval_secs.saturating_mul(1000), move || refresh_count(ctx, store));
        // Dropping the interval with the component cancels it
        let _poller = StoredValue::new_local(poller);
    }

    // Keeps relative times current while the panel stays open
    let ticker = Interval::new(CLOCK_TICK_MS, move || {
        if open.get_untracked() {
            set_clock.set(now_ms());
        }
    });
    let _ticker = StoredValue::new_local(ticker);

    let toggle = move |_| {
        let now_open = !open.get_untracked();
        set_open.set(now_open);
        if now_open {
            set_clock.set(now_ms());
            refresh_count(ctx, store);
            refresh_list(ctx, store, set_loading);
        }
    };

    let mark_all = move |_| {
        let Some(user_id) = ctx.user_id() else { return };
        let client = ctx.api();
        spawn_local(async move {
            match api::mark_all_read(&client, &user_id).await {
                Ok(()) => store_mark_all_read(&store),
                Err(e) => {
                    web_sys::console::error_1(&format!("[NOTIFY] Mark all read failed: {}", e).into());
                    toasts.error("Could not mark notifications as read.", ctx.toast_duration_ms());
                    ctx.refresh_notifications();
                }
            }
        });
    };

    let open_notification = move |notification: Notification| {
        if !notification.is_read {
            store_mark_read(&store, notification.id);
            let client = ctx.api();
            let id = notification.id;
            spawn_local(async move {
                if let Err(e) = api::mark_read(&client, id).await {
                    web_sys::console::error_1(&format!("[NOTIFY] Mark read {} failed: {}", id, e).into());
                }
            });
        }
        if let Some(link) = notification.link.filter(|l| !l.is_empty()) {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href(&link);
            }
        }
    };

    view! {
        <div class="notification-dropdown">
            <button class="notification-bell" title="Notifications" on:click=toggle>
                "🔔"
                <Show when=move || { store.unread_count().get() > 0 }>
                    <span class="notification-badge">{move || badge_text(store.unread_count().get())}</span>
                </Show>
            </button>

            <Show when=move || open.get()>
                <div class="dropdown-backdrop" on:click=move |_| set_open.set(false)></div>
                <div class="notification-panel">
                    <div class="notification-panel-header">
                        <span>"Notifications"</span>
                        <button
                            class="btn-link"
                            title="Refresh"
                            disabled=move || loading.get()
                            on:click=move |_| ctx.refresh_notifications()
                        >
                            "↻"
                        </button>
                        <button
                            class="btn-link"
                            disabled=move || store.unread_count().get() == 0
                            on:click=mark_all
                        >
                            "Mark all as read"
                        </button>
                    </div>

                    <Show when=move || loading.get()>
                        <div class="loading">"Loading..."</div>
                    </Show>

                    <ul class="notification-list">
                        <Show when=move || !loading.get() && store.notifications().with(|list| list.is_empty())>
                            <li class="empty-state">"No notifications"</li>
                        </Show>
                        <For
                            each=move || store.notifications().get()
                            key=|n| (n.id, n.is_read)
                            children=move |notification| {
                                let created_at = notification.created_at.clone();
                                let when = move || relative_time(&created_at, clock.get());
                                let is_read = notification.is_read;
                                let title = notification.title.clone();
                                let message = notification.message.clone();
                                view! {
                                    <li
                                        class="notification-item"
                                        class:unread=!is_read
                                        on:click=move |_| open_notification(notification.clone())
                                    >
                                        <div class="notification-title">{title}</div>
                                        <div class="notification-message">{message}</div>
                                        <div class="notification-time">{when}</div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(badge_text(0), "0");
        assert_eq!(badge_text(7), "7");
        assert_eq!(badge_text(99), "99");
        assert_eq!(badge_text(100), "99+");
    }

    #[test]
    fn test_relative_time_follows_clock() {
        let created = "2024-03-01T12:00:00Z";
        let base = parse_timestamp(created).unwrap().timestamp_millis();
        assert_eq!(relative_time(created, base + 5 * 60_000), "5 min ago");
        assert_eq!(relative_time(created, base + 3 * 3_600_000), "3 h ago");
    }

    #[test]
    fn test_relative_time_keeps_unparseable_text() {
        assert_eq!(relative_time("yesterday-ish", 0), "yesterday-ish");
    }
}
