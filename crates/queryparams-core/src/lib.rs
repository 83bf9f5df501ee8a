//! # `queryparams` Core
//!
//! Typed read/write access to the query parameters of a URL.
//!
//! Reading casts each raw value (`"1"` becomes a number, `"true"` a boolean,
//! `[1,2]` a JSON array, ...). Writing merges into or replaces the current
//! query string, applies the new URL through an injected [`Navigator`] and
//! notifies every subscriber of the [`QueryParamsProvider`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use queryparams_core::{params, MemoryNavigator, ParamValue, QueryParams, QueryParamsProvider, SetOptions};
//!
//! let navigator = Rc::new(MemoryNavigator::new("http://test.com?foo=hello"));
//! let provider = Rc::new(QueryParamsProvider::new());
//! let store = QueryParams::new(navigator, provider);
//!
//! let url = store.set(&params! { "bar" => 1 }, &SetOptions::default()).unwrap();
//! assert_eq!(url, "http://test.com?foo=hello&bar=1");
//!
//! let read = store.get(&["foo", "bar"]);
//! assert_eq!(read["bar"], ParamValue::Number(1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // i64 -> f64 for JavaScript numbers
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod navigation;
pub mod provider;
pub mod query;
pub mod store;
pub mod value;

pub use config::{
    ConfigError, HistoryMode, LoggingConfig, QueryParamsConfig, UndefinedPolicy, WriteConfig,
};
pub use error::{Error, Result};
pub use navigation::{MemoryNavigator, Navigator};
pub use provider::{Observer, QueryParamsProvider, SubscriptionId};
pub use store::{QueryParams, QueryParamsBuilder, SetOptions};
pub use value::{cast, ParamValue, ParameterSet};
