pub mod console_pane;
pub mod model_pane;

use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;
use crate::layout::panel::Panel;

/// Shared wrapper: a pane is kept in the DOM and hidden unless its panel
/// is the current selection.
#[component]
pub fn Pane(panel: Panel, children: Children) -> impl IntoView {
    let ctx = use_context::<ViewerContext>().expect("ViewerContext not found");

    view! {
        <section
            class="pane"
            class:hidden=move || !ctx.is_panel_selected(panel)
        >
            <header class="pane__header">{panel.label()}</header>
            {children()}
        </section>
    }
}
