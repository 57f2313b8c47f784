use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use host_bridge::web::{read_host_data, HttpFetcher, WindowHost};
use host_bridge::{
    load_into_host, summarize, IntegrationOutcome, LoadError, LoadObserver, LoadRequest,
    StatsOutcome, StatsSource,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

use crate::config::PresenterConfig;
use crate::dom::set_text;

const MANUAL_FALLBACK_NOTICE: &str = "Couldn't load the map automatically. \
Use FMG \u{2192} Open and select the .map.\nSee console for details.";

/// Everything a load attempt needs, shared by every click.
pub struct MapLoader {
    config: Rc<PresenterConfig>,
    map_url: String,
}

impl MapLoader {
    pub fn new(config: Rc<PresenterConfig>, map_url: String) -> Self {
        Self { config, map_url }
    }
}

/// Fetch and deliver in the background; a second click simply starts another attempt.
pub fn start_load(loader: &Rc<MapLoader>) {
    let loader = loader.clone();
    spawn_local(async move {
        let observer = PageObserver {
            stats: loader.config.host.stats.clone(),
            stat_id: loader.config.ids.stat.clone(),
        };
        let request = LoadRequest {
            url: &loader.map_url,
            file_name: &loader.config.preset.map_file,
            now_ms: js_sys::Date::now(),
        };
        // The observer already reported the outcome.
        let _ = load_into_host(
            &HttpFetcher,
            &WindowHost,
            &observer,
            &loader.config.host,
            request,
        )
        .await;
    });
}

struct PageObserver {
    stats: StatsSource,
    stat_id: String,
}

impl LoadObserver for PageObserver {
    fn delivered(&self, _outcome: &IntegrationOutcome, refresh_after_ms: u32) {
        let stats = self.stats.clone();
        let stat_id = self.stat_id.clone();
        spawn_local(async move {
            TimeoutFuture::new(refresh_after_ms).await;
            refresh_stats(&stats, &stat_id);
        });
    }

    fn failed(&self, error: &LoadError) {
        web_sys::console::error_2(
            &JsValue::from_str("Presenter: map load failed:"),
            &JsValue::from_str(&error.to_string()),
        );
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(MANUAL_FALLBACK_NOTICE);
        }
    }
}

/// Rewrite the stats field from host data; leaves it untouched when nothing is readable.
pub fn refresh_stats(source: &StatsSource, stat_id: &str) {
    if let StatsOutcome::Updated(text) = summarize(read_host_data(source).as_ref()) {
        set_text(stat_id, &text);
    }
}

pub fn bind_load_button(button: &Element, loader: Rc<MapLoader>) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
        start_load(&loader);
    }));
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
