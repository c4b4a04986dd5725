//! Dispute Table Component
//!
//! Filterable, paginated table of compensation disputes.

use leptos::prelude::*;

use crate::components::PageControls;
use crate::context::use_app_context;
use crate::dispute::DisputeBoard;
use crate::models::{format_amount, parse_timestamp, Dispute, DisputeStatus};
use crate::store::{use_app_store, AppStateStoreFields};

/// Column count for the empty-state cell
const COLUMN_COUNT: &str = "8";

/// Dispute table with status filter, search box and page controls
#[component]
pub fn DisputeTable(
    /// Dispute picked for a decision
    set_deciding: WriteSignal<Option<u32>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let page_size = ctx.config.with_value(|c| c.page_size);
    let board = RwSignal::new(DisputeBoard::new(page_size));

    // Current page rows plus a pager whose total matches the filtered list
    let page = Memo::new(move |_| {
        let disputes = store.disputes().get();
        let mut current = board.get();
        let rows = current.visible(&disputes);
        (rows, *current.pager())
    });
    let pager = Signal::derive(move || page.get().1);

    let go_to_page = move |number: usize| {
        let disputes = store.disputes().get_untracked();
        board.update(|b| {
            b.apply(&disputes);
            b.go_to(number);
        });
    };

    let status_value = move || {
        board.with(|b| b.filter().status.map(|s| s.key()).unwrap_or("all"))
    };

    view! {
        <section class="dispute-board">
            <div class="table-toolbar">
                <select
                    class="status-filter"
                    prop:value=status_value
                    on:change=move |ev| {
                        let status = DisputeStatus::from_key(&event_target_value(&ev));
                        board.update(|b| b.set_status(status));
                    }
                >
                    <option value="all">"All statuses"</option>
                    {DisputeStatus::ALL.into_iter().map(|status| view! {
                        <option value=status.key()>{status.label()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="search"
                    class="dispute-search"
                    placeholder="Search booking, item or party..."
                    prop:value=move || board.with(|b| b.filter().query.clone())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        board.update(|b| b.set_query(query));
                    }
                />
                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| board.update(|b| b.clear_filter())
                >
                    "Clear"
                </button>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Booking"</th>
                        <th>"Item"</th>
                        <th>"Renter"</th>
                        <th>"Owner"</th>
                        <th class="num">"Claimed"</th>
                        <th>"Status"</th>
                        <th>"Opened"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || !page.with(|(rows, _)| rows.is_empty())
                        fallback=|| view! {
                            <tr>
                                <td class="empty-state" colspan=COLUMN_COUNT>
                                    "No disputes match the current filters."
                                </td>
                            </tr>
                        }
                    >
                        <For
                            each=move || page.get().0
                            key=|dispute| dispute.id
                            children=move |dispute| view! { <DisputeRow dispute=dispute set_deciding=set_deciding /> }
                        />
                    </Show>
                </tbody>
            </table>

            <PageControls pager=pager on_page=go_to_page />
        </section>
    }
}

#[component]
fn DisputeRow(dispute: Dispute, set_deciding: WriteSignal<Option<u32>>) -> impl IntoView {
    let id = dispute.id;
    let closed = dispute.status.is_closed();
    let opened = parse_timestamp(&dispute.created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| dispute.created_at.clone());

    view! {
        <tr class:closed=closed>
            <td><a href=dispute.details_href()>{dispute.booking_code.clone()}</a></td>
            <td>{dispute.item_title.clone()}</td>
            <td>{dispute.renter_name.clone()}</td>
            <td>{dispute.owner_name.clone()}</td>
            <td class="num">{format_amount(dispute.claimed_amount)}</td>
            <td><span class=dispute.status.badge_class()>{dispute.status.label()}</span></td>
            <td>{opened}</td>
            <td>
                <button
                    class="btn btn-sm"
                    disabled=closed
                    title=if closed { "This dispute is closed" } else { "Record a decision" }
                    on:click=move |_| set_deciding.set(Some(id))
                >
                    "Decide"
                </button>
            </td>
        </tr>
    }
}

