//! Page Controls Component
//!
//! Prev / page numbers / Next strip under a paginated table.

use leptos::prelude::*;

use crate::pagination::{PageControl, Pager, PAGE_WINDOW};

/// Page-control strip. Renders nothing for an empty list.
///
/// # Arguments
/// * `pager` - Cursor for the list being shown
/// * `on_page` - Called with the requested page number; out-of-range values are the receiver's to ignore
#[component]
pub fn PageControls(
    #[prop(into)] pager: Signal<Pager>,
    #[prop(into)] on_page: Callback<usize>,
) -> impl IntoView {
    let render_control = move |control: PageControl| {
        let current = pager.get_untracked().page();
        match control {
            PageControl::Prev { enabled } => view! {
                <li>
                    <button
                        class="page-btn page-prev"
                        disabled=!enabled
                        on:click=move |_| on_page.run(current.saturating_sub(1))
                    >
                        "‹"
                    </button>
                </li>
            }.into_any(),
            PageControl::Page { number, active } => view! {
                <li>
                    <button
                        class=if active { "page-btn active" } else { "page-btn" }
                        aria-current=if active { Some("page") } else { None }
                        on:click=move |_| on_page.run(number)
                    >
                        {number}
                    </button>
                </li>
            }.into_any(),
            PageControl::Ellipsis => view! {
                <li class="page-ellipsis">"…"</li>
            }.into_any(),
            PageControl::Next { enabled } => view! {
                <li>
                    <button
                        class="page-btn page-next"
                        disabled=!enabled
                        on:click=move |_| on_page.run(current + 1)
                    >
                        "›"
                    </button>
                </li>
            }.into_any(),
        }
    };

    view! {
        <Show when=move || !pager.get().is_empty()>
            <nav class="pagination">
                <span class="pagination-summary">{move || pager.get().summary()}</span>
                <ul class="pagination-list">
                    {move || pager.get().controls(PAGE_WINDOW).into_iter().map(render_control).collect_view()}
                </ul>
            </nav>
        </Show>
    }
}
