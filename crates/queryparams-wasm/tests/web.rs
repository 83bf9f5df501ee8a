//! Browser integration tests for QueryParams
//!
//! Run with: `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use queryparams_wasm::QueryParams;

wasm_bindgen_test_configure!(run_in_browser);

fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
    }
    obj.into()
}

fn field(obj: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

fn fresh() -> QueryParams {
    let params = QueryParams::new().expect("Failed to bind to window");
    params.set(object(&[]), Some(true), None).unwrap();
    params
}

// =============================================================================
// Write Tests
// =============================================================================

#[wasm_bindgen_test]
fn test_set_updates_location() {
    let params = fresh();

    let url = params
        .set(object(&[("page", JsValue::from_f64(2.0))]), None, None)
        .unwrap();

    let search = web_sys::window().unwrap().location().search().unwrap();
    assert!(url.ends_with("?page=2"));
    assert_eq!(search, "?page=2");
}

#[wasm_bindgen_test]
fn test_set_merges_by_default() {
    let params = fresh();
    params
        .set(object(&[("a", JsValue::from_str("x"))]), None, None)
        .unwrap();

    let url = params
        .set(object(&[("b", JsValue::from_bool(true))]), None, None)
        .unwrap();

    assert!(url.ends_with("?a=x&b=true"));
}

#[wasm_bindgen_test]
fn test_set_replace_drops_existing() {
    let params = fresh();
    params
        .set(object(&[("a", JsValue::from_str("x"))]), None, None)
        .unwrap();

    let url = params
        .set(object(&[("b", JsValue::from_f64(1.0))]), Some(true), None)
        .unwrap();

    assert!(url.ends_with("?b=1"));
}

#[wasm_bindgen_test]
fn test_set_rejects_non_object() {
    let params = fresh();
    assert!(params.set(JsValue::from_f64(1.0), None, None).is_err());
}

// =============================================================================
// Read Tests
// =============================================================================

#[wasm_bindgen_test]
fn test_get_casts_values() {
    let params = fresh();
    let nested = object(&[("color", JsValue::from_str("red"))]);
    params
        .set(
            object(&[
                ("page", JsValue::from_f64(3.0)),
                ("open", JsValue::from_bool(false)),
                ("q", JsValue::from_str("red shoes")),
                ("filters", nested),
            ]),
            None,
            None,
        )
        .unwrap();

    let keys = vec![
        "page".to_string(),
        "open".to_string(),
        "q".to_string(),
        "filters".to_string(),
        "missing".to_string(),
    ];
    let got = params.get(keys).unwrap();

    assert_eq!(field(&got, "page").as_f64(), Some(3.0));
    assert_eq!(field(&got, "open").as_bool(), Some(false));
    assert_eq!(field(&got, "q").as_string().as_deref(), Some("red shoes"));
    assert_eq!(
        field(&field(&got, "filters"), "color").as_string().as_deref(),
        Some("red")
    );
    assert!(field(&got, "missing").is_undefined());
}

// =============================================================================
// Subscription Tests
// =============================================================================

#[wasm_bindgen_test]
fn test_subscribe_receives_url() {
    let params = fresh();
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&seen);
    let callback = Closure::<dyn FnMut(String)>::new(move |url: String| {
        sink.borrow_mut().push(url);
    });
    params.subscribe(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    let url = params
        .set(object(&[("x", JsValue::from_f64(1.0))]), None, None)
        .unwrap();

    assert_eq!(*seen.borrow(), vec![url]);
    drop(callback);
}

#[wasm_bindgen_test]
fn test_unsubscribe_stops_notifications() {
    let params = fresh();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let callback = Closure::<dyn FnMut(String)>::new(move |_url: String| {
        *sink.borrow_mut() += 1;
    });
    let id = params.subscribe(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    assert!(params.unsubscribe(id));
    assert!(!params.unsubscribe(id));
    params
        .set(object(&[("x", JsValue::from_f64(1.0))]), None, None)
        .unwrap();

    assert_eq!(*count.borrow(), 0);
    drop(callback);
}

#[wasm_bindgen_test]
fn test_history_records_writes() {
    let params = fresh();

    let first = params
        .set(object(&[("step", JsValue::from_f64(1.0))]), None, None)
        .unwrap();
    let second = params
        .set(object(&[("step", JsValue::from_f64(2.0))]), None, None)
        .unwrap();

    let history = params.history();
    assert_eq!(history.len(), 3);
    assert_eq!(&history[1..], &[first, second]);
}
