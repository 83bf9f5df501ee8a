//! queryparams WASM - typed URL query parameters in the browser
//!
//! This crate binds `queryparams-core` to `window.location` and
//! `window.history`, so page state kept in the query string can be read with
//! types and written back as new history entries.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { QueryParams } from 'queryparams-wasm';
//!
//! await init();
//!
//! const params = new QueryParams();
//! const id = params.subscribe((url) => render(url));
//!
//! params.set({ page: 2, filters: { color: "red" } });  // merge
//! params.set({ q: "shoes" }, true);                     // replace
//! const { page, filters } = params.get(["page", "filters"]);
//! ```

use std::rc::Rc;

use queryparams_core::{
    Error, QueryParams as Store, QueryParamsProvider, SetOptions, SubscriptionId, WriteConfig,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// Tracing has no subscriber in the browser, so subscriber failures also go to the console.
macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

mod convert;
mod navigator;

pub use navigator::BrowserNavigator;

/// Query parameters of the current page.
#[wasm_bindgen]
pub struct QueryParams {
    store: Store,
    provider: Rc<QueryParamsProvider>,
}

#[wasm_bindgen]
impl QueryParams {
    /// Binds to the current page with default write settings
    /// (merge, skip `undefined`, push history entries).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<QueryParams, JsValue> {
        Self::with_config(WriteConfig::default())
    }

    /// Reads and casts the given keys. Missing or empty keys are left out of
    /// the returned object.
    #[wasm_bindgen]
    pub fn get(&self, keys: Vec<String>) -> Result<JsValue, JsValue> {
        convert::set_to_object(&self.store.get(&keys))
    }

    /// Writes `params` into the URL, pushes a history entry and notifies
    /// subscribers. Returns the new URL.
    ///
    /// # Arguments
    ///
    /// * `params` - Plain object of values to write
    /// * `replace` - Drop the existing query string instead of merging into it
    /// * `url` - Write onto this URL's base; the merged query still comes from the current page
    #[wasm_bindgen]
    pub fn set(
        &self,
        params: JsValue,
        replace: Option<bool>,
        url: Option<String>,
    ) -> Result<String, JsValue> {
        let params = convert::object_to_set(&params)?;
        let options = SetOptions { replace, url };
        self.store.set(&params, &options).map_err(to_js_error)
    }

    /// Calls `callback(url)` after every write. Returns an id for
    /// [`QueryParams::unsubscribe`].
    #[wasm_bindgen]
    pub fn subscribe(&self, callback: js_sys::Function) -> u64 {
        let id = self.provider.subscribe(move |url| {
            callback
                .call1(&JsValue::NULL, &JsValue::from_str(url))
                .map(|_| ())
                .map_err(|e| {
                    let message = e.as_string().unwrap_or_else(|| format!("{e:?}"));
                    console_log!("queryparams subscriber threw: {}", message);
                    anyhow::anyhow!(message)
                })
        });
        id.get()
    }

    /// Removes a subscriber. Returns false if the id was unknown.
    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u64) -> bool {
        self.provider.unsubscribe(SubscriptionId::from(id))
    }

    /// URLs written through this instance, oldest first.
    #[wasm_bindgen]
    pub fn history(&self) -> Vec<String> {
        self.provider.history()
    }
}

impl QueryParams {
    /// Binds to the current page with an explicit write configuration.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window.
    pub fn with_config(config: WriteConfig) -> Result<QueryParams, JsValue> {
        let navigator = BrowserNavigator::new().map_err(to_js_error)?;
        let provider = Rc::new(QueryParamsProvider::new());
        let store = Store::builder()
            .navigator(Rc::new(navigator))
            .provider(Rc::clone(&provider))
            .config(config)
            .build()
            .map_err(to_js_error)?;

        Ok(Self { store, provider })
    }
}

fn to_js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}
