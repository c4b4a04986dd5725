//! Password Strength Component
//!
//! Meter, label and requirement checklist for a password field.

use leptos::prelude::*;

use crate::password::{meter_percent, strength, PasswordChecks};

/// Strength meter bound to a password signal
#[component]
pub fn PasswordStrength(#[prop(into)] password: Signal<String>) -> impl IntoView {
    let level = move || password.with(|p| strength(p));

    view! {
        <div class="password-strength">
            <div class="strength-meter">
                <div
                    class=move || format!("strength-bar {}", level().css_class())
                    style=move || format!("width: {}%", password.with(|p| meter_percent(p)))
                ></div>
            </div>
            <span class="strength-label">{move || level().label()}</span>
            <ul class="strength-checklist">
                {move || {
                    let checks = password.with(|p| PasswordChecks::of(p));
                    checks.checklist().into_iter().map(|(label, passed)| view! {
                        <li class:passed=passed>
                            {if passed { "✓ " } else { "○ " }}
                            {label}
                        </li>
                    }).collect_view()
                }}
            </ul>
        </div>
    }
}

/// Match indicator for a confirm-password field. Hidden until something is typed.
#[component]
pub fn PasswordMatch(
    #[prop(into)] password: Signal<String>,
    #[prop(into)] confirm: Signal<String>,
) -> impl IntoView {
    let matches = move || password.get() == confirm.get();

    view! {
        <Show when=move || !confirm.with(|c| c.is_empty())>
            <span class=move || if matches() { "password-match ok" } else { "password-match mismatch" }>
                {move || if matches() { "Passwords match" } else { "Passwords do not match" }}
            </span>
        </Show>
    }
}
