use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn create_div(
    doc: &Document,
    id: Option<&str>,
    class: Option<&str>,
) -> Result<HtmlElement, JsValue> {
    let el = doc
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not HTMLElement"))?;
    if let Some(id) = id {
        el.set_id(id);
    }
    if let Some(class) = class {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Set `textContent` of the element with `id`, if present.
pub fn set_text(id: &str, text: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    {
        el.set_text_content(Some(text));
    }
}
