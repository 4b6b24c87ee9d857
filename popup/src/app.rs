//! Root popup component and WASM entry point.

use leptos::prelude::*;

use crate::state::popup::PopupState;
use crate::util::api_key;

/// The popup: loading, result, and error panels plus key settings.
///
/// Exactly one panel is visible once the flow starts; the result panel takes
/// pre-escaped markup from the renderer.
#[component]
pub fn Popup() -> impl IntoView {
    let state = RwSignal::new(PopupState::default());
    provide_context(state);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(crate::flow::analyze_active_tab(state));

    view! {
        <main class="popup">
            <h1 class="popup__title">"MoodLens"</h1>
            <Show when=move || state.with(|s| s.visibility.loading)>
                <div class="popup__loading">"Analyzing emotions..."</div>
            </Show>
            <Show when=move || state.with(|s| s.visibility.result)>
                <div class="popup__result" inner_html=move || state.with(|s| s.result_html.clone())></div>
            </Show>
            <Show when=move || state.with(|s| s.visibility.error)>
                <div class="popup__error" role="alert">
                    <span class="popup__error-icon">"⚠️"</span>
                    <span>{move || state.with(|s| s.error_message.clone())}</span>
                </div>
            </Show>
            <ApiKeySettings/>
        </main>
    }
}

#[component]
fn ApiKeySettings() -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let saved = RwSignal::new(api_key::read_stored().is_some());

    let on_save = move |_| {
        if api_key::store(&draft.get_untracked()) {
            saved.set(true);
            draft.set(String::new());
        }
    };

    view! {
        <details class="popup__settings">
            <summary>{move || if saved.get() { "API key saved" } else { "Set API key" }}</summary>
            <input
                type="password"
                placeholder="API key"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button on:click=on_save>"Save"</button>
        </details>
    }
}

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(error) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger unavailable: {error}").into());
    }
    leptos::mount::mount_to_body(Popup);
}
