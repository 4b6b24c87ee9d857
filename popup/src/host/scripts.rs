//! Page functions injected into the active tab with `chrome.scripting`.
//!
//! The bodies live in `js/page_scripts.js` as real functions and are passed
//! to `executeScript` by reference. Extension pages run under a CSP without
//! `unsafe-eval`, so nothing here may build a function from a string.

/// One of the functions exported through `pageScript` in `js/page_scripts.js`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageScript {
    Hostname,
    Selection,
    EditorSurface,
    CopySelection,
}

impl PageScript {
    pub const ALL: [PageScript; 4] = [Self::Hostname, Self::Selection, Self::EditorSurface, Self::CopySelection];

    /// Key of the function in the module's `PAGE_SCRIPTS` table.
    pub fn export_name(self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Selection => "selection",
            Self::EditorSurface => "editorSurface",
            Self::CopySelection => "copySelection",
        }
    }
}

#[cfg(feature = "csr")]
mod binding {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(module = "/js/page_scripts.js")]
    extern "C" {
        #[wasm_bindgen(js_name = pageScript)]
        pub fn page_script(name: &str) -> JsValue;
    }
}

#[cfg(feature = "csr")]
impl PageScript {
    /// The JS function to hand to `executeScript` as `func`.
    ///
    /// # Errors
    ///
    /// Returns the looked-up value when the module has no such function.
    pub fn function(self) -> Result<js_sys::Function, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;
        binding::page_script(self.export_name()).dyn_into::<js_sys::Function>()
    }
}

#[cfg(test)]
#[path = "scripts_test.rs"]
mod scripts_test;
