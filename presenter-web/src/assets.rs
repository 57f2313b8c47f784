//! Asset URLs relative to the script that loaded the presenter.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement, Url};

fn script_src(el: Option<web_sys::Element>) -> Option<String> {
    let src = el?.dyn_into::<HtmlScriptElement>().ok()?.src();
    (!src.is_empty()).then_some(src)
}

/// `document.currentScript`, else the last `<script>` on the page.
pub fn script_base(doc: &Document) -> Option<String> {
    if let Some(src) = script_src(doc.current_script()) {
        return Some(src);
    }
    let scripts = doc.scripts();
    let last = scripts.length().checked_sub(1)?;
    script_src(scripts.item(last))
}

pub fn resolve_asset(file: &str, base: Option<&str>) -> String {
    match base {
        Some(base) => Url::new_with_base(file, base)
            .map(|u| u.href())
            .unwrap_or_else(|_| file.to_string()),
        None => file.to_string(),
    }
}
