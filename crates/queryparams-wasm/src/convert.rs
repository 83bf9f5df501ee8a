//! Conversions between JS values and `ParamValue`.

use queryparams_core::{ParamValue, ParameterSet};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Converts a cast value into the JS value a caller expects back.
pub fn to_js(value: &ParamValue) -> Result<JsValue, JsValue> {
    match value {
        ParamValue::Undefined => Ok(JsValue::UNDEFINED),
        ParamValue::Null => Ok(JsValue::NULL),
        ParamValue::Bool(b) => Ok(JsValue::from_bool(*b)),
        ParamValue::Number(n) => Ok(JsValue::from_f64(*n)),
        ParamValue::String(s) => Ok(JsValue::from_str(s)),
        ParamValue::Array(_) | ParamValue::Object(_) => {
            let json = value.to_json().unwrap_or(serde_json::Value::Null);
            json.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    }
}

/// Converts an arbitrary JS value into a parameter value.
pub fn from_js(value: &JsValue) -> Result<ParamValue, JsValue> {
    if value.is_undefined() {
        return Ok(ParamValue::Undefined);
    }
    if value.is_null() {
        return Ok(ParamValue::Null);
    }
    if let Some(b) = value.as_bool() {
        return Ok(ParamValue::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        return Ok(ParamValue::Number(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(ParamValue::String(s));
    }

    serde_wasm_bindgen::from_value::<serde_json::Value>(value.clone())
        .map(ParamValue::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Builds a plain JS object from a parameter set.
pub fn set_to_object(params: &ParameterSet) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    for (key, value) in params {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), &to_js(value)?)?;
    }
    Ok(object.into())
}

/// Reads the own enumerable properties of a JS object into a parameter set.
pub fn object_to_set(params: &JsValue) -> Result<ParameterSet, JsValue> {
    if !params.is_object() {
        return Err(JsValue::from_str("query params must be an object"));
    }

    let object: &js_sys::Object = params.unchecked_ref();
    let mut set = ParameterSet::new();
    for key in js_sys::Object::keys(object).iter() {
        let value = js_sys::Reflect::get(object, &key)?;
        let name = key
            .as_string()
            .ok_or_else(|| JsValue::from_str("query param keys must be strings"))?;
        set.insert(name, from_js(&value)?);
    }
    Ok(set)
}
