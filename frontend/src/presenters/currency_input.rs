use shared::normalize_currency_input;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

/// Rewrite the field value as `Rp 1.234.567`, or clear it
pub fn format_field(element: &Element) {
    let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
        return;
    };
    let formatted = normalize_currency_input(&input.value());
    if formatted != input.value() {
        input.set_value(&formatted);
    }
}

/// Page-ready pass: only fields the server prefilled are touched
pub fn normalize_prefilled(element: &Element) {
    let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
        return;
    };
    if !input.value().is_empty() {
        format_field(element);
    }
}
