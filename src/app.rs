//! Marketplace Admin App
//!
//! Dashboard shell: header with notifications, dispute board and profile editor.

use leptos::prelude::*;
use leptos_toast::{bind_navigation_cleanup, provide_toasts, ToastContainer};
use reactive_stores::Store;

use crate::components::{DisputeDecisionForm, DisputeTable, NotificationDropdown, ProfileTabs};
use crate::config::{load_embedded_json, AppConfig};
use crate::context::AppContext;
use crate::models::Dispute;
use crate::store::{AppState, AppStateStoreFields};

/// Server-rendered dispute list
const DISPUTES_ELEMENT_ID: &str = "disputes-data";

/// Top-level dashboard section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Disputes,
    Profile,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Disputes => "Disputes",
            Section::Profile => "My profile",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let disputes: Vec<Dispute> = load_embedded_json(DISPUTES_ELEMENT_ID).unwrap_or_default();
    web_sys::console::log_1(&format!("[APP] Loaded {} disputes, user={:?}", disputes.len(), config.user_id).into());

    // Provide store and context to all children
    let store = Store::new(AppState::new(disputes));
    provide_context(store);
    provide_context(AppContext::new(config, signal(0u32)));
    let toasts = provide_toasts();
    bind_navigation_cleanup(toasts);

    // State
    let (section, set_section) = signal(Section::Disputes);
    let (deciding, set_deciding) = signal::<Option<u32>>(None);

    let deciding_dispute = Memo::new(move |_| {
        let id = deciding.get()?;
        store.disputes().with(|list| list.iter().find(|d| d.id == id).cloned())
    });

    // Switching sections is a client-side navigation
    let switch_to = move |next: Section| {
        if section.get_untracked() != next {
            toasts.close_all();
            set_deciding.set(None);
            set_section.set(next);
        }
    };

    view! {
        <div class="admin-layout">
            <header class="admin-header">
                <h1>"Admin Dashboard"</h1>
                <nav class="admin-nav">
                    {[Section::Disputes, Section::Profile].into_iter().map(|s| view! {
                        <button
                            class=move || if section.get() == s { "nav-btn active" } else { "nav-btn" }
                            on:click=move |_| switch_to(s)
                        >
                            {s.label()}
                        </button>
                    }).collect_view()}
                </nav>
                <NotificationDropdown />
            </header>

            <main class="admin-content">
                {move || match section.get() {
                    Section::Disputes => view! {
                        <DisputeTable set_deciding=set_deciding />
                        {move || deciding_dispute.get().map(|dispute| view! {
                            <DisputeDecisionForm dispute=dispute on_close=move |_| set_deciding.set(None) />
                        })}
                    }.into_any(),
                    Section::Profile => view! { <ProfileTabs /> }.into_any(),
                }}
            </main>

            <ToastContainer />
        </div>
    }
}
