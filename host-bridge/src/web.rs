//! Browser implementations: the page's global object as host surface and
//! gloo-net as transport.

use async_trait::async_trait;
use gloo_net::http::Request;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DataTransfer, DragEvent, DragEventInit, File, FilePropertyBag, RequestCache};

use crate::config::StatsSource;
use crate::load::{FetchResponse, LoadError, ResourceFetcher};
use crate::probe::{DropFile, DropTarget, HostError, HostSurface};
use crate::stats::{EntityRecord, HostData};

/// Readable message for a thrown JS value.
pub fn describe_js(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}

fn host_err(context: &str, err: JsValue) -> HostError {
    HostError(format!("{context}: {}", describe_js(&err)))
}

fn is_nullish(v: &JsValue) -> bool {
    v.is_null() || v.is_undefined()
}

/// Walk a dotted path from `root`. Missing links and throwing getters give `None`.
pub fn resolve_in(root: &JsValue, path: &str) -> Option<JsValue> {
    let mut cur = root.clone();
    for key in path.split('.').filter(|k| !k.is_empty()) {
        if is_nullish(&cur) {
            return None;
        }
        cur = Reflect::get(&cur, &JsValue::from_str(key)).ok()?;
    }
    (!is_nullish(&cur)).then_some(cur)
}

pub fn resolve_global(path: &str) -> Option<JsValue> {
    resolve_in(&js_sys::global().into(), path)
}

fn callable(path: &str) -> Result<Function, HostError> {
    resolve_global(path)
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| HostError(format!("{path} is not a function")))
}

/// The page's global object and document.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowHost;

impl HostSurface for WindowHost {
    fn is_callable(&self, path: &str) -> bool {
        resolve_global(path).is_some_and(|v| v.is_function())
    }

    fn call_with_text(&self, path: &str, text: &str) -> Result<(), HostError> {
        callable(path)?
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(text))
            .map(|_| ())
            .map_err(|e| host_err(path, e))
    }

    fn call_with_state(&self, path: &str, state_path: &str, text: &str) -> Result<(), HostError> {
        let state = resolve_global(state_path).unwrap_or(JsValue::UNDEFINED);
        callable(path)?
            .call2(&JsValue::UNDEFINED, &state, &JsValue::from_str(text))
            .map(|_| ())
            .map_err(|e| host_err(path, e))
    }

    fn dispatch_drop(&self, target_id: &str, file: &DropFile<'_>) -> Result<DropTarget, HostError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HostError("no document".into()))?;

        let parts = Array::of1(&JsValue::from_str(file.contents));
        let props = FilePropertyBag::new();
        props.set_type(file.mime);
        let blob = File::new_with_str_sequence_and_options(&parts, file.name, &props)
            .map_err(|e| host_err("File", e))?;

        let transfer = DataTransfer::new().map_err(|e| host_err("DataTransfer", e))?;
        transfer
            .items()
            .add_with_file(&blob)
            .map_err(|e| host_err("DataTransfer.items.add", e))?;

        let init = DragEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_data_transfer(Some(&transfer));
        let event = DragEvent::new_with_event_init_dict("drop", &init)
            .map_err(|e| host_err("DragEvent", e))?;

        match document.get_element_by_id(target_id) {
            Some(el) => {
                el.dispatch_event(&event)
                    .map_err(|e| host_err("dispatchEvent", e))?;
                Ok(DropTarget::Element(target_id.to_string()))
            }
            None => {
                let body = document
                    .body()
                    .ok_or_else(|| HostError("document has no body".into()))?;
                body.dispatch_event(&event)
                    .map_err(|e| host_err("dispatchEvent", e))?;
                Ok(DropTarget::Body)
            }
        }
    }
}

/// GET with `cache: "no-store"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

#[async_trait(?Send)]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, LoadError> {
        let resp = Request::get(url)
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(|e| LoadError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let status = resp.status();
        if !resp.ok() {
            return Ok(FetchResponse {
                status,
                body: String::new(),
            });
        }
        let body = resp.text().await.map_err(|e| LoadError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(FetchResponse { status, body })
    }
}

fn numeric_series(value: &JsValue) -> Option<Vec<f64>> {
    // Typed arrays and plain arrays both expose `reduce`.
    let reduce = Reflect::get(value, &JsValue::from_str("reduce")).ok()?;
    if !reduce.is_function() {
        return None;
    }
    Array::from(value).iter().map(|v| v.as_f64()).collect()
}

fn entity_records(value: &JsValue, source: &StatsSource) -> Option<Vec<Option<EntityRecord>>> {
    if !Array::is_array(value) {
        return None;
    }
    let items: &Array = value.unchecked_ref();
    let records = items
        .iter()
        .map(|item| {
            if item.is_falsy() {
                return None;
            }
            let field = |name: &str| {
                Reflect::get(&item, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
            };
            Some(EntityRecord {
                active: field(&source.active_field).is_truthy(),
                removed: field(&source.removed_field).is_truthy(),
                value: field(&source.value_field).as_f64(),
            })
        })
        .collect();
    Some(records)
}

/// Snapshot the host's data structure; `None` when it does not exist.
pub fn read_host_data(source: &StatsSource) -> Option<HostData> {
    let root = resolve_global(&source.data_global)?;
    Some(HostData {
        series: resolve_in(&root, &source.series_path).and_then(|v| numeric_series(&v)),
        entities: resolve_in(&root, &source.entities_path)
            .and_then(|v| entity_records(&v, source)),
    })
}
