#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use storm_backdrop::{presets, start, start_by_id};

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str, attach: bool) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    div.set_id(id);
    div.style().set_property("width", "320px").unwrap();
    div.style().set_property("height", "200px").unwrap();
    if attach {
        document.body().unwrap().append_child(&div).unwrap();
    }
    div
}

fn options(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

fn webgl2_available() -> bool {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    matches!(canvas.get_context("webgl2"), Ok(Some(_)))
}

#[wasm_bindgen_test]
fn presets_are_listed() {
    let ids: Vec<String> = presets().iter().filter_map(|v| v.as_string()).collect();
    assert_eq!(ids, vec!["storm", "tempest", "haze"]);
}

#[wasm_bindgen_test]
fn missing_container_is_rejected() {
    assert!(start(None, JsValue::UNDEFINED).is_err());
    assert!(start_by_id("no-such-element", JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn detached_container_is_rejected() {
    let div = container("detached", false);
    let err = start(Some(div.clone()), JsValue::UNDEFINED).err().unwrap();
    assert!(err.as_string().unwrap().contains("not attached"));
    assert_eq!(div.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn bad_options_leave_container_untouched() {
    let div = container("bad-options", true);
    for json in [
        r#"{"preset": "aurora"}"#,
        r#"{"strikeIntervalRange": [500, 100]}"#,
        r##"{"lightColor": "#12"}"##,
        r#"{"speed": 2}"#,
    ] {
        assert!(start(Some(div.clone()), options(json)).is_err(), "{json} accepted");
        assert_eq!(div.child_element_count(), 0, "{json} left a canvas behind");
    }
    div.remove();
}

#[wasm_bindgen_test]
fn non_object_options_are_rejected() {
    let div = container("function-options", true);
    let callback = js_sys::Function::new_no_args("return 1;");
    let err = start(Some(div.clone()), callback.into()).err().unwrap();
    assert!(err.as_string().unwrap().contains("invalid backdrop option"));
    assert_eq!(div.child_element_count(), 0);
    div.remove();
}

#[wasm_bindgen_test]
fn start_then_stop_removes_canvas() {
    if !webgl2_available() {
        return;
    }
    let div = container("lifecycle", true);
    let mut handle = start(Some(div.clone()), JsValue::UNDEFINED).unwrap();
    assert!(handle.is_running());
    assert_eq!(div.child_element_count(), 1);
    assert_eq!(div.first_element_child().unwrap().tag_name(), "CANVAS");

    handle.stop();
    assert!(!handle.is_running());
    assert_eq!(div.child_element_count(), 0);
    assert!(handle.time().is_nan());

    handle.stop();
    assert_eq!(div.child_element_count(), 0);
    div.remove();
}

#[wasm_bindgen_test]
fn instances_do_not_share_state() {
    if !webgl2_available() {
        return;
    }
    let a = container("first", true);
    let b = container("second", true);
    let mut first = start(Some(a.clone()), options(r#"{"preset": "storm"}"#)).unwrap();
    let mut second = start_by_id("second", options(r#"{"preset": "haze"}"#)).unwrap();

    first.stop();
    assert!(second.is_running());
    assert_eq!(a.child_element_count(), 0);
    assert_eq!(b.child_element_count(), 1);
    assert_eq!(second.lightning_intensity(), 0.0);

    second.stop();
    assert_eq!(b.child_element_count(), 0);
    a.remove();
    b.remove();
}
