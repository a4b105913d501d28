//! Thin helpers over `web-sys` for reading the server-rendered page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// All elements matching `selector`; an invalid selector matches nothing.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_first(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Existing element with `id`, or a new `<div>` appended to `<body>`
pub fn ensure_host(id: &str) -> Option<Element> {
    if let Some(existing) = by_id(id) {
        return Some(existing);
    }
    let doc = document()?;
    let host = doc.create_element("div").ok()?;
    host.set_id(id);
    doc.body()?.append_child(&host).ok()?;
    Some(host)
}
