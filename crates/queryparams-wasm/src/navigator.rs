//! Browser navigator over `window.location` and `window.history`.

use queryparams_core::{Error, Navigator, Result};
use wasm_bindgen::JsValue;
use web_sys::{History, Window};

/// [`Navigator`] backed by the global `window`.
pub struct BrowserNavigator {
    window: Window,
}

impl BrowserNavigator {
    /// Binds to the global `window`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingContext`] outside a browser main thread
    /// (Node, workers), where there is no `window`.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| {
            Error::MissingContext("no global `window`; QueryParams must run in a browser".into())
        })?;
        Ok(Self { window })
    }

    fn history(&self) -> Result<History> {
        self.window.history().map_err(navigation_error)
    }
}

impl Navigator for BrowserNavigator {
    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn current_query(&self) -> String {
        let search = self.window.location().search().unwrap_or_default();
        search.trim_start_matches('?').to_string()
    }

    fn push_url(&self, url: &str) -> Result<()> {
        self.history()?
            .push_state_with_url(&js_sys::Object::new(), "", Some(url))
            .map_err(navigation_error)
    }

    fn replace_url(&self, url: &str) -> Result<()> {
        self.history()?
            .replace_state_with_url(&js_sys::Object::new(), "", Some(url))
            .map_err(navigation_error)
    }
}

fn navigation_error(err: JsValue) -> Error {
    Error::Navigation(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}
