//! Dispute Decision Form Component
//!
//! Compensation decision for one dispute. Posts natively to the admin page
//! once the input validates and the admin confirms.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::dialog;
use crate::dispute::{validate_decision, DecisionInput, DecisionKind, MIN_NOTE_CHARS};
use crate::models::{format_amount, Dispute};

/// Decision form panel
///
/// # Arguments
/// * `dispute` - Dispute being decided
/// * `on_close` - Called when the panel is dismissed without submitting
#[component]
pub fn DisputeDecisionForm(
    dispute: Dispute,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let action = ctx.config.with_value(|c| c.decision_action_for(dispute.id));

    let (kind, set_kind) = signal::<Option<DecisionKind>>(None);
    let (amount, set_amount) = signal(String::new());
    let (note, set_note) = signal(String::new());

    let closed = dispute.status.is_closed();
    let claimed = dispute.claimed_amount;
    let booking_code = dispute.booking_code.clone();

    // Value posted as `Amount`
    let posted_amount = move || match kind.get() {
        Some(DecisionKind::ApproveFull) => claimed.to_string(),
        Some(DecisionKind::ApprovePartial) => amount.get().trim().replace(',', ""),
        _ => "0".to_string(),
    };

    // Let the browser post only when the input validates and the admin confirms
    let on_submit = move |ev: web_sys::SubmitEvent| {
        let input = DecisionInput {
            kind: kind.get_untracked(),
            amount: amount.get_untracked(),
            note: note.get_untracked(),
        };
        match validate_decision(&input, claimed) {
            Ok(decision) => {
                if !dialog::confirm(&decision.confirm_message(&booking_code)) {
                    ev.prevent_default();
                }
            }
            Err(e) => {
                ev.prevent_default();
                dialog::alert(&e.to_string());
            }
        }
    };

    view! {
        <div class="decision-panel">
            <div class="decision-header">
                <span class="decision-title">{format!("Decision for {}", dispute.booking_code)}</span>
                <button class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
            </div>

            <dl class="decision-summary">
                <dt>"Item"</dt>
                <dd>{dispute.item_title.clone()}</dd>
                <dt>"Renter / Owner"</dt>
                <dd>{format!("{} / {}", dispute.renter_name, dispute.owner_name)}</dd>
                <dt>"Claimed"</dt>
                <dd>{format_amount(claimed)}</dd>
                {dispute.description.clone().map(|text| view! {
                    <dt>"Description"</dt>
                    <dd class="decision-description">{text}</dd>
                })}
            </dl>

            <form class="decision-form" method="post" action=action on:submit=on_submit>
                <fieldset disabled=closed>
                    <legend>"Decision"</legend>
                    {DecisionKind::ALL.into_iter().map(|option| view! {
                        <label class="decision-option">
                            <input
                                type="radio"
                                name="Decision"
                                value=option.value()
                                prop:checked=move || kind.get() == Some(option)
                                on:change=move |_| set_kind.set(Some(option))
                            />
                            {option.label()}
                        </label>
                    }).collect_view()}

                    <Show when=move || kind.get() == Some(DecisionKind::ApprovePartial)>
                        <label class="decision-amount">
                            "Amount"
                            <input
                                type="text"
                                inputmode="decimal"
                                placeholder=format!("max {}", format_amount(claimed))
                                prop:value=move || amount.get()
                                on:input=move |ev| set_amount.set(event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <input type="hidden" name="Amount" prop:value=posted_amount />

                    <label class="decision-note">
                        "Note"
                        <textarea
                            name="Note"
                            rows="4"
                            placeholder=format!("Reason for the decision (at least {} characters)", MIN_NOTE_CHARS)
                            prop:value=move || note.get()
                            on:input=move |ev| set_note.set(event_target_value(&ev))
                        ></textarea>
                    </label>

                    <div class="decision-actions">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">"Submit decision"</button>
                    </div>
                </fieldset>
                <Show when=move || closed>
                    <p class="decision-closed">"This dispute is closed and can no longer be decided."</p>
                </Show>
            </form>
        </div>
    }
}
