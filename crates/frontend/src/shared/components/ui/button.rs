use leptos::prelude::*;

/// Button component with variants (primary, secondary, ghost)
#[component]
pub fn Button(
    /// Button variant: "primary" (default), "secondary", or "ghost"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    /// Click event handler
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    /// Button children (content)
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "button--secondary",
        "ghost" => "button--ghost",
        _ => "button--primary",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <button
            type="button"
            class=move || format!("button {} {}", variant_class(), additional_class())
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
