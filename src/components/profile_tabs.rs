//! Profile Tabs Component
//!
//! Profile edit page split into Info / Security / Verification tabs. The
//! active tab lives in `location.hash` so back/forward and links work.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_toast::use_toasts;

use crate::camera;
use crate::components::{CameraCapture, PasswordMatch, PasswordStrength};
use crate::context::use_app_context;
use crate::dialog;
use crate::password::validate_password_change;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileTab {
    Info,
    Security,
    Verification,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::Info, ProfileTab::Security, ProfileTab::Verification];

    pub fn key(self) -> &'static str {
        match self {
            ProfileTab::Info => "info",
            ProfileTab::Security => "security",
            ProfileTab::Verification => "verification",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Info => "Profile",
            ProfileTab::Security => "Password",
            ProfileTab::Verification => "Identity verification",
        }
    }

    /// Tab for a `location.hash` value; unknown hashes fall back to Info
    pub fn from_hash(hash: &str) -> Self {
        let key = hash.trim_start_matches('#');
        Self::ALL.into_iter().find(|t| t.key() == key).unwrap_or(ProfileTab::Info)
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Tabbed profile editor
#[component]
pub fn ProfileTabs() -> impl IntoView {
    let (active, set_active) = signal(ProfileTab::from_hash(&current_hash()));

    // Back/forward and manual hash edits
    let on_hash = window_event_listener(ev::hashchange, move |_| {
        set_active.set(ProfileTab::from_hash(&current_hash()));
    });
    on_cleanup(move || on_hash.remove());

    let select = move |tab: ProfileTab| {
        if active.get_untracked() == tab {
            return;
        }
        set_active.set(tab);
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_hash(tab.key());
        }
    };

    view! {
        <section class="profile-editor">
            <div class="tab-bar" role="tablist">
                {ProfileTab::ALL.into_iter().map(|tab| view! {
                    <button
                        role="tab"
                        class=move || if active.get() == tab { "tab active" } else { "tab" }
                        aria-selected=move || (active.get() == tab).to_string()
                        on:click=move |_| select(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            <div class="tab-panel" class:hidden=move || active.get() != ProfileTab::Info>
                <ProfileInfoForm />
            </div>
            <div class="tab-panel" class:hidden=move || active.get() != ProfileTab::Security>
                <ChangePasswordForm />
            </div>
            <div class="tab-panel" class:hidden=move || active.get() != ProfileTab::Verification>
                <VerificationForm active=Signal::derive(move || active.get() == ProfileTab::Verification) />
            </div>
        </section>
    }
}

#[component]
fn ProfileInfoForm() -> impl IntoView {
    view! {
        <form class="profile-form" method="post">
            <input type="hidden" name="Section" value="info" />
            <label>"Full name" <input type="text" name="FullName" required=true /></label>
            <label>"Email" <input type="email" name="Email" required=true /></label>
            <label>"Phone" <input type="tel" name="PhoneNumber" /></label>
            <label>"Address" <textarea name="Address" rows="2"></textarea></label>
            <button type="submit" class="btn btn-primary">"Save profile"</button>
        </form>
    }
}

#[component]
fn ChangePasswordForm() -> impl IntoView {
    let (current, set_current) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        let result = validate_password_change(
            &current.get_untracked(),
            &new_password.get_untracked(),
            &confirm.get_untracked(),
        );
        if let Err(e) = result {
            ev.prevent_default();
            dialog::alert(&e.to_string());
        }
    };

    view! {
        <form class="profile-form" method="post" on:submit=on_submit>
            <input type="hidden" name="Section" value="security" />
            <label>
                "Current password"
                <input
                    type="password"
                    name="CurrentPassword"
                    autocomplete="current-password"
                    on:input=move |ev| set_current.set(event_target_value(&ev))
                />
            </label>
            <label>
                "New password"
                <input
                    type="password"
                    name="NewPassword"
                    autocomplete="new-password"
                    on:input=move |ev| set_new_password.set(event_target_value(&ev))
                />
            </label>
            <PasswordStrength password=new_password />
            <label>
                "Confirm new password"
                <input
                    type="password"
                    name="ConfirmPassword"
                    autocomplete="new-password"
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
            </label>
            <PasswordMatch password=new_password confirm=confirm />
            <button type="submit" class="btn btn-primary">"Change password"</button>
        </form>
    }
}

#[component]
fn VerificationForm(active: Signal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let toasts = use_toasts();
    let file_ref = NodeRef::<html::Input>::new();
    let (has_photo, set_has_photo) = signal(false);

    let on_capture = move |blob: web_sys::Blob| {
        let Some(input) = file_ref.get_untracked() else { return };
        match camera::attach_to_file_input(&blob, &input, "verification.jpg") {
            Ok(()) => {
                set_has_photo.set(true);
                toasts.success("Photo captured. Submit to send it for review.", ctx.toast_duration_ms());
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[CAMERA] Attach failed: {:?}", e).into());
                toasts.error("Could not attach the photo. Please try again.", ctx.toast_duration_ms());
            }
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        if !has_photo.get_untracked() {
            ev.prevent_default();
            dialog::alert("Please capture a photo before submitting.");
        }
    };

    view! {
        <form class="profile-form" method="post" enctype="multipart/form-data" on:submit=on_submit>
            <input type="hidden" name="Section" value="verification" />
            <p class="hint">"Hold your ID card next to your face and make sure both are clearly visible."</p>
            <CameraCapture on_capture=on_capture active=active />
            <input type="file" name="VerificationPhoto" accept="image/jpeg" class="hidden" node_ref=file_ref />
            <button type="submit" class="btn btn-primary" disabled=move || !has_photo.get()>
                "Submit for verification"
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_hash() {
        assert_eq!(ProfileTab::from_hash(""), ProfileTab::Info);
        assert_eq!(ProfileTab::from_hash("#security"), ProfileTab::Security);
        assert_eq!(ProfileTab::from_hash("verification"), ProfileTab::Verification);
        assert_eq!(ProfileTab::from_hash("#unknown"), ProfileTab::Info);
    }

    #[test]
    fn test_tab_keys_are_distinct() {
        for tab in ProfileTab::ALL {
            assert_eq!(ProfileTab::from_hash(&format!("#{}", tab.key())), tab);
        }
    }
}
