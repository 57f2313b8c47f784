use std::cell::RefCell;
use std::rc::Rc;

use presenter_core::{escape_html, fact_sheet, render_card};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, HtmlElement};

use crate::assets::{resolve_asset, script_base};
use crate::config::{self, PresenterConfig};
use crate::dom::{create_div, document};
use crate::loader::{bind_load_button, MapLoader};
use crate::sheet::{enable_resize, enable_toggle, SheetController};

fn load_config() -> PresenterConfig {
    match config::from_global() {
        Ok(Some(cfg)) => cfg,
        Ok(None) => PresenterConfig::defaults(),
        Err(err) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Presenter: {err}; using defaults"
            )));
            PresenterConfig::defaults()
        }
    }
}

fn sheet_header(cfg: &PresenterConfig) -> String {
    format!(
        r#"<div class="sheet-header">
  <div class="handle" title="Drag to resize • double-click to cycle"></div>
  <h2>{title}</h2>
  <div class="meta"><i>{motto}</i> · Press “{key}” to toggle</div>
</div>
<div class="content"></div>"#,
        title = escape_html(&cfg.preset.nation_name),
        motto = escape_html(&cfg.preset.motto),
        key = cfg.hotkey.key.to_uppercase(),
    )
}

fn append_cards(
    doc: &Document,
    content: &HtmlElement,
    cfg: &PresenterConfig,
    flag_url: &str,
) -> Result<(), JsValue> {
    for card in fact_sheet(&cfg.preset, &cfg.facts, flag_url, &cfg.ids.load_button) {
        let el = create_div(doc, None, Some("card"))?;
        if card.wide {
            el.class_list().add_1("span2")?;
        }
        el.set_inner_html(&render_card(&card));
        content.append_child(&el)?;
    }
    Ok(())
}

/// Build the chip and sheet and attach every handler.
pub fn mount(cfg: PresenterConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let base = cfg.asset_base.clone().or_else(|| script_base(&doc));
    let map_url = resolve_asset(&cfg.preset.map_file, base.as_deref());
    let flag_url = resolve_asset(&cfg.preset.flag_file, base.as_deref());

    let chip = create_div(&doc, Some(&cfg.ids.chip), None)?;
    chip.set_text_content(Some(&format!(
        "Presenter ({})",
        cfg.hotkey.key.to_lowercase()
    )));
    body.append_child(&chip)?;

    let sheet = create_div(&doc, Some(&cfg.ids.sheet), None)?;
    sheet.set_inner_html(&sheet_header(&cfg));
    let shared = Rc::new(RefCell::new(SheetController::new(
        sheet.clone(),
        &cfg.storage_key,
    )));
    body.append_child(&sheet)?;

    let content = sheet
        .query_selector(".content")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| JsValue::from_str("sheet content missing"))?;
    content.set_id(&cfg.ids.content);
    append_cards(&doc, &content, &cfg, &flag_url)?;

    let cfg = Rc::new(cfg);
    if let Some(button) = doc.get_element_by_id(&cfg.ids.load_button) {
        bind_load_button(&button, Rc::new(MapLoader::new(cfg.clone(), map_url)))?;
    }

    enable_toggle(&shared, &chip, cfg.hotkey)?;

    // Without a handle the sheet still toggles; it just cannot be resized.
    if let Some(handle) = sheet.query_selector(".handle")? {
        enable_resize(&shared, &handle)?;
    }
    Ok(())
}

/// Mount now, or once the DOM is parsed.
pub fn boot() -> Result<(), JsValue> {
    let doc = document()?;
    let ready_state = js_sys::Reflect::get(&doc, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string());
    if ready_state.as_deref() != Some("loading") {
        return mount(load_config());
    }
    let on_ready = Closure::once_into_js(move || {
        if let Err(err) = mount(load_config()) {
            web_sys::console::error_2(&JsValue::from_str("Presenter: mount failed:"), &err);
        }
    });
    let opts = AddEventListenerOptions::new();
    opts.set_once(true);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.unchecked_ref(),
        &opts,
    )
}
