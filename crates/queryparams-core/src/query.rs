//! Query string codec and URL composition.
//!
//! Query strings use `application/x-www-form-urlencoded` (the encoding of
//! the browser's `URLSearchParams`): pairs joined with `&`, spaces as `+`,
//! everything outside `[A-Za-z0-9*-._]` percent-encoded.
//!
//! A composed URL is always `base?query`, where `base` is the text of the
//! target URL before its first `?`.

use url::form_urlencoded;

use crate::config::UndefinedPolicy;
use crate::value::{ParamValue, ParameterSet};

/// Returns the part of `url` before the first `?`.
///
/// # Examples
///
/// ```
/// use queryparams_core::query::base_url;
///
/// assert_eq!(base_url("http://x.com/p?a=1"), "http://x.com/p");
/// assert_eq!(base_url("http://x.com"), "http://x.com");
/// ```
#[must_use]
pub fn base_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Returns the query string of `url`: the text after the first `?`, up to
/// any `#` fragment. Empty when the URL has no query.
#[must_use]
pub fn query_of(url: &str) -> &str {
    let Some((_, rest)) = url.split_once('?') else {
        return "";
    };
    rest.split_once('#').map_or(rest, |(query, _)| query)
}

/// Decodes a query string into raw `(key, value)` pairs, in order.
///
/// A leading `?` is ignored. Duplicate keys are kept.
#[must_use]
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Returns the raw value of the first occurrence of `key`.
#[must_use]
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Serializes a parameter set into a query string (without the `?`).
///
/// Values are converted with [`ParamValue::to_query_value`]; parameters for
/// which it yields nothing are left out.
#[must_use]
pub fn build(params: &ParameterSet, policy: UndefinedPolicy) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if let Some(text) = value.to_query_value(policy) {
            serializer.append_pair(key, &text);
        }
    }
    serializer.finish()
}

/// Composes `url` with `params` as its whole query string.
#[must_use]
pub fn replace(params: &ParameterSet, url: &str, policy: UndefinedPolicy) -> String {
    compose(url, &build(params, policy))
}

/// Composes `url` with the pairs of `existing_query` overlaid by `params`.
///
/// Existing pairs keep their raw text and their order; an input key that is
/// already present overwrites the value in place, new keys are appended.
/// With [`UndefinedPolicy::Skip`] an `Undefined` input removes the key.
#[must_use]
pub fn merge(
    params: &ParameterSet,
    existing_query: &str,
    url: &str,
    policy: UndefinedPolicy,
) -> String {
    let mut merged: ParameterSet = parse_pairs(existing_query)
        .into_iter()
        .map(|(key, value)| (key, ParamValue::String(value)))
        .collect();

    for (key, value) in params {
        if value.is_undefined() && policy == UndefinedPolicy::Skip {
            merged.shift_remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    compose(url, &build(&merged, policy))
}

fn compose(url: &str, query: &str) -> String {
    format!("{}?{}", base_url(url), query)
}
