use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer data-zone="footer" class="status-bar">
            <span class="status-bar__credit">"Powered by ldraw.rs"</span>
        </footer>
    }
}
