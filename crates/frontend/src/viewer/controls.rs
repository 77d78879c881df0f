//! Bottom overlay: next-step button and the step slider.

use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;
use crate::shared::components::ui::Slider;
use crate::shared::icons::icon;

#[component]
pub fn StepControls() -> impl IntoView {
    let ctx = use_context::<ViewerContext>().expect("ViewerContext not found");

    let step_count = Signal::derive(move || ctx.step_count());

    view! {
        <div class="controls-overlay">
            <button
                id="next-button"
                class="controls-overlay__next"
                title="Next step"
                on:click=move |_| ctx.next_step()
            >
                {icon("chevron-right")}
            </button>
            <Slider
                min=1usize
                max=step_count
                value=ctx.current_step
                on_input=Callback::new(move |step| ctx.set_step(step))
                class="controls-overlay__slider"
            />
            <span class="controls-overlay__step">
                {move || format!("{} / {}", ctx.current_step.get(), step_count.get())}
            </span>
        </div>
    }
}
