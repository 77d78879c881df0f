//! Console pane: scrollable list of viewer log entries.

use leptos::prelude::*;

use crate::layout::panel::Panel;
use crate::layout::panes::Pane;
use crate::shared::console::{ConsoleEntry, ConsoleService};

#[component]
pub fn ConsolePane() -> impl IntoView {
    let console = use_context::<ConsoleService>().expect("ConsoleService not found");

    view! {
        <Pane panel=Panel::Console>
            <ul class="console">
                <For
                    each=move || console.entries.get()
                    key=|entry| entry.id
                    children=move |entry: ConsoleEntry| {
                        view! {
                            <li class=format!("console__entry {}", entry.level.css_class())>
                                <span class="console__time">{entry.timestamp.clone()}</span>
                                <span class="console__message">{entry.message.clone()}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </Pane>
    }
}
