//! The query parameter store.
//!
//! [`QueryParams`] holds no parameter state of its own. Every `get` derives
//! from the navigator's current URL and every `set` composes a new URL,
//! hands it to the navigator and then to the change provider.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::{HistoryMode, WriteConfig};
use crate::error::{Error, Result};
use crate::navigation::Navigator;
use crate::provider::QueryParamsProvider;
use crate::query::{self, first_value, parse_pairs};
use crate::value::{cast, from_json_object, to_json_object, ParameterSet};

/// Per-call write options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Replace the whole query string instead of merging into it.
    /// `None` falls back to [`WriteConfig::replace`].
    pub replace: Option<bool>,
    /// URL to compose against instead of the current one.
    pub url: Option<String>,
}

impl SetOptions {
    /// Options that replace the whole query string.
    #[must_use]
    pub fn replacing() -> Self {
        Self {
            replace: Some(true),
            url: None,
        }
    }

    /// Sets the merge/replace policy.
    #[must_use]
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = Some(replace);
        self
    }

    /// Sets the URL to compose against.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Typed access to the query parameters of the navigator's URL.
pub struct QueryParams {
    navigator: Rc<dyn Navigator>,
    provider: Rc<QueryParamsProvider>,
    config: WriteConfig,
}

impl QueryParams {
    /// Creates a store with the default write configuration.
    pub fn new(navigator: Rc<dyn Navigator>, provider: Rc<QueryParamsProvider>) -> Self {
        Self {
            navigator,
            provider,
            config: WriteConfig::default(),
        }
    }

    /// Starts building a store.
    #[must_use]
    pub fn builder() -> QueryParamsBuilder {
        QueryParamsBuilder::default()
    }

    /// Returns the change provider this store writes through.
    #[must_use]
    pub fn provider(&self) -> &Rc<QueryParamsProvider> {
        &self.provider
    }

    /// Returns the write configuration.
    #[must_use]
    pub fn config(&self) -> WriteConfig {
        self.config
    }

    /// Reads and casts the requested parameters.
    ///
    /// Keys that are absent, or whose first occurrence is empty, are left out
    /// of the result.
    pub fn get<K: AsRef<str>>(&self, keys: &[K]) -> ParameterSet {
        let pairs = parse_pairs(&self.navigator.current_query());

        let params: ParameterSet = keys
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                first_value(&pairs, key)
                    .filter(|raw| !raw.is_empty())
                    .map(|raw| (key.to_string(), cast(raw)))
            })
            .collect();

        tracing::debug!(
            requested = keys.len(),
            found = params.len(),
            "Read query params"
        );
        params
    }

    /// Reads the requested parameters into a typed view.
    ///
    /// `T` usually has only `Option` fields, since any key may be missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the values do not fit `T`.
    pub fn get_as<T, K>(&self, keys: &[K]) -> Result<T>
    where
        T: DeserializeOwned,
        K: AsRef<str>,
    {
        let object = to_json_object(&self.get(keys));
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Writes `params` into the URL and notifies the provider.
    ///
    /// Returns the composed URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`] if the navigator rejects the URL; the
    /// provider is not notified in that case.
    pub fn set(&self, params: &ParameterSet, options: &SetOptions) -> Result<String> {
        let replace = options.replace.unwrap_or(self.config.replace);
        let policy = self.config.undefined;

        // `options.url` only supplies the base; merging always starts from
        // the current query.
        let url = match &options.url {
            Some(target) if replace => query::replace(params, target, policy),
            Some(target) => query::merge(
                params,
                &self.navigator.current_query(),
                target,
                policy,
            ),
            None if replace => query::replace(params, &self.navigator.current_url(), policy),
            None => query::merge(
                params,
                &self.navigator.current_query(),
                &self.navigator.current_url(),
                policy,
            ),
        };

        match self.config.history {
            HistoryMode::Push => self.navigator.push_url(&url)?,
            HistoryMode::Replace => self.navigator.replace_url(&url)?,
        }

        tracing::debug!(
            replace,
            history = ?self.config.history,
            params = params.len(),
            url = %url,
            "Wrote query params"
        );

        self.provider.update(&url);
        Ok(url)
    }

    /// Writes a serializable value as query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `value` does not serialize to a
    /// JSON object, or any error of [`QueryParams::set`].
    pub fn set_from<T: Serialize>(&self, value: &T, options: &SetOptions) -> Result<String> {
        match serde_json::to_value(value)? {
            Value::Object(object) => self.set(&from_json_object(object), options),
            other => Err(Error::Serialization(format!(
                "query params must serialize to an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl fmt::Debug for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParams")
            .field("url", &self.navigator.current_url())
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`QueryParams`].
#[derive(Default)]
pub struct QueryParamsBuilder {
    navigator: Option<Rc<dyn Navigator>>,
    provider: Option<Rc<QueryParamsProvider>>,
    config: WriteConfig,
}

impl QueryParamsBuilder {
    /// Sets the navigator.
    #[must_use]
    pub fn navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Sets the change provider.
    #[must_use]
    pub fn provider(mut self, provider: Rc<QueryParamsProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the write configuration.
    #[must_use]
    pub fn config(mut self, config: WriteConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingContext`] if the navigator or the provider
    /// was not set.
    pub fn build(self) -> Result<QueryParams> {
        let navigator = self.navigator.ok_or_else(|| {
            Error::MissingContext("QueryParams needs a navigator to read and write URLs".into())
        })?;
        let provider = self.provider.ok_or_else(|| {
            Error::MissingContext(
                "QueryParams must be used within a QueryParamsProvider".into(),
            )
        })?;

        Ok(QueryParams {
            navigator,
            provider,
            config: self.config,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
