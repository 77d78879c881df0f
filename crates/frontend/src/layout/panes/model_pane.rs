//! Model loader pane: textarea plus the Load button.

use leptos::prelude::*;
use ldraw::color::MaterialRegistry;
use ldraw::parser::parse_multipart_document;

use crate::layout::global_context::ViewerContext;
use crate::layout::panel::Panel;
use crate::layout::panes::Pane;
use crate::shared::components::ui::{Button, Textarea};
use crate::shared::console::ConsoleService;

#[component]
pub fn ModelPane() -> impl IntoView {
    let ctx = use_context::<ViewerContext>().expect("ViewerContext not found");
    let console = use_context::<ConsoleService>().expect("ConsoleService not found");

    let text = RwSignal::new(String::new());

    let on_load = move |_| {
        let source = text.get_untracked();
        if source.trim().is_empty() {
            console.warn("Nothing to load: the model text is empty.");
            return;
        }
        match parse_multipart_document(&MaterialRegistry::core(), &source) {
            Ok(document) => {
                let name = if document.body.description.is_empty() {
                    "untitled model".to_string()
                } else {
                    document.body.description.clone()
                };
                let commands = document.body.commands.len();
                let steps = document.body.step_count();
                let missing = ldraw::display_list::Wireframe::from_document(&document, steps)
                    .missing;

                ctx.set_model(document, name.clone());
                console.info(format!(
                    "Loaded '{}': {} commands, {} step(s).",
                    name, commands, steps
                ));
                for alias in missing {
                    console.warn(format!("Part '{}' is not in the pasted text; skipped.", alias));
                }
            }
            Err(e) => {
                console.error(format!("Load failed: {}", e));
            }
        }
    };

    view! {
        <Pane panel=Panel::Model>
            <Textarea
                value=text
                on_input=Callback::new(move |value| text.set(value))
                placeholder="Paste an LDraw model (.ldr / .mpd text)"
                rows=18
                id="model-source"
            />
            <div class="pane__actions">
                <Button on_click=Callback::new(on_load)>"Load"</Button>
            </div>
        </Pane>
    }
}
