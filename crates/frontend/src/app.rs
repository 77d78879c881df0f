use crate::layout::global_context::ViewerContext;
use crate::layout::Shell;
use crate::shared::console::ConsoleService;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the viewer store and the console log to the whole app.
    let console = ConsoleService::new();
    provide_context(ViewerContext::new());
    provide_context(console);

    console.info("Viewer ready. Paste an LDraw model and press Load.");

    view! {
        <Shell />
    }
}
