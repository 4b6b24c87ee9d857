//! The active browser tab as a [`DocumentHost`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The popup cannot touch the page directly. Every read injects one of the
//! functions from `js/page_scripts.js` into the tab via
//! `chrome.scripting.executeScript`, which needs the
//! `activeTab` and `scripting` permissions. The clipboard is read from the
//! popup's own `navigator.clipboard`, which needs `clipboardRead`.
//!
//! The tab is looked up on every call. The popup only lives as long as the
//! user keeps it open, so the active tab cannot change under it.

use std::time::Duration;

use js_sys::{Array, Function, Object, Promise, Reflect};
use moodlens::DocumentHost;
use moodlens::extract::{DocumentIdentity, HostError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::scripts::PageScript;
use super::tab_id_from;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = query, catch)]
    async fn query_tabs(query: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "scripting"], js_name = executeScript, catch)]
    async fn execute_script(injection: &JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ActiveTab;

impl ActiveTab {
    async fn tab_id(&self) -> Result<i32, HostError> {
        let query = Object::new();
        set(&query, "active", &JsValue::TRUE)?;
        set(&query, "currentWindow", &JsValue::TRUE)?;
        let tabs = Array::from(&query_tabs(&query).await.map_err(js_error)?);
        if tabs.length() == 0 {
            return Err(HostError("no active tab".into()));
        }
        let id = Reflect::get(&tabs.get(0), &"id".into()).map_err(js_error)?;
        id.as_f64()
            .and_then(tab_id_from)
            .ok_or_else(|| HostError(format!("active tab has no usable id: {id:?}")))
    }

    /// Run `script` in the tab's top frame and return its result.
    async fn run(&self, script: PageScript) -> Result<JsValue, HostError> {
        let func = script.function().map_err(|value| {
            HostError(format!("page script {} is not a function: {value:?}", script.export_name()))
        })?;
        let target = Object::new();
        set(&target, "tabId", &JsValue::from(self.tab_id().await?))?;
        let injection = Object::new();
        set(&injection, "target", &target)?;
        set(&injection, "func", &func)?;

        let results = Array::from(&execute_script(&injection).await.map_err(js_error)?);
        Reflect::get(&results.get(0), &"result".into()).map_err(js_error)
    }

    async fn run_for_text(&self, script: PageScript) -> Result<String, HostError> {
        Ok(self.run(script).await?.as_string().unwrap_or_default())
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentHost for ActiveTab {
    async fn identity(&self) -> Result<DocumentIdentity, HostError> {
        Ok(DocumentIdentity::new(self.run_for_text(PageScript::Hostname).await?))
    }

    async fn live_selection(&self) -> Result<String, HostError> {
        self.run_for_text(PageScript::Selection).await
    }

    async fn editor_surface_text(&self) -> Result<Option<String>, HostError> {
        let text = self.run_for_text(PageScript::EditorSurface).await?;
        Ok((!text.trim().is_empty()).then_some(text))
    }

    async fn trigger_copy(&self) -> Result<(), HostError> {
        if self.run(PageScript::CopySelection).await?.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(HostError("the page refused the copy command".into()))
        }
    }

    async fn read_clipboard(&self) -> Result<String, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError("no window".into()))?;
        let clipboard = Reflect::get(&window.navigator(), &"clipboard".into()).map_err(js_error)?;
        let read_text = Reflect::get(&clipboard, &"readText".into())
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(js_error)?;
        let promise = read_text.call0(&clipboard).map_err(js_error)?.dyn_into::<Promise>().map_err(js_error)?;
        let text = JsFuture::from(promise).await.map_err(js_error)?;
        Ok(text.as_string().unwrap_or_default())
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), HostError> {
    Reflect::set(target, &key.into(), value).map_err(js_error)?;
    Ok(())
}

fn js_error(value: JsValue) -> HostError {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return HostError(String::from(error.message()));
    }
    HostError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
