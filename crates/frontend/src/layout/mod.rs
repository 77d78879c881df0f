pub mod footer;
pub mod global_context;
pub mod panel;
pub mod panes;
pub mod sidebar;

use leptos::prelude::*;

use crate::viewer::canvas::ViewerCanvas;
use crate::viewer::controls::StepControls;
use footer::Footer;
use panes::console_pane::ConsolePane;
use panes::model_pane::ModelPane;
use sidebar::Sidebar;

/// Main application shell.
///
/// ```text
/// +---------+----------+--------------------------+
/// | Sidebar | Pane     |                          |
/// | (menu)  | (model / |         Canvas           |
/// |         | console) |                          |
/// +---------+----------+--------------------------+
/// |              StepControls (overlay)           |
/// +-----------------------------------------------+
/// |                   Footer                      |
/// +-----------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="app-body">
                <Sidebar />
                <ModelPane />
                <ConsolePane />
                <div class="app-main">
                    <ViewerCanvas />
                    <StepControls />
                </div>
            </div>
            <Footer />
        </div>
    }
}
