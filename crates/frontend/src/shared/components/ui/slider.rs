use leptos::prelude::*;

/// Range slider with reactive bounds.
#[component]
pub fn Slider(
    /// Lower bound (inclusive)
    #[prop(into)]
    min: Signal<usize>,
    /// Upper bound (inclusive)
    #[prop(into)]
    max: Signal<usize>,
    /// Current value
    #[prop(into)]
    value: Signal<usize>,
    /// Fired with the parsed value on every input event
    #[prop(optional)]
    on_input: Option<Callback<usize>>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <input
            type="range"
            class=move || format!("slider {}", class.get().unwrap_or_default())
            min=move || min.get().to_string()
            max=move || max.get().to_string()
            prop:value=move || value.get().to_string()
            on:input=move |ev| {
                if let Some(handler) = on_input {
                    if let Ok(parsed) = event_target_value(&ev).parse::<usize>() {
                        handler.run(parsed);
                    }
                }
            }
        />
    }
}
