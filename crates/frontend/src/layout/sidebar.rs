//! Fixed sidebar with the two pane labels.

use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;
use crate::layout::panel::Panel;
use crate::shared::icons::icon;

#[component]
fn MenuLabel(panel: Panel) -> impl IntoView {
    let ctx = use_context::<ViewerContext>().expect("ViewerContext not found");

    view! {
        <button
            id=panel.menu_id()
            class="sidebar__item"
            class:sidebar__item--selected=move || ctx.is_panel_selected(panel)
            on:click=move |_| ctx.toggle_panel(panel)
        >
            {icon(match panel {
                Panel::Model => "cube",
                Panel::Console => "terminal",
            })}
            <span class="sidebar__label">{panel.label()}</span>
        </button>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav data-zone="left" class="sidebar">
            {Panel::ALL
                .into_iter()
                .map(|panel| view! { <MenuLabel panel=panel /> })
                .collect_view()}
        </nav>
    }
}
