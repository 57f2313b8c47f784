//! DOM binding for [`PanelState`]: chip/hotkey toggling and handle resizing.

use std::cell::RefCell;
use std::rc::Rc;

use presenter_core::{FocusKind, Hotkey, KeyPress, PanelState, PreferenceStore};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Element, EventTarget, HtmlElement, KeyboardEvent, MouseEvent,
    TouchEvent, Window,
};

use crate::dom::{document, window};
use crate::storage::LocalStorage;

const HIDDEN_CLASS: &str = "hidden";
const RESIZING_CLASS: &str = "resizing";

pub struct SheetController {
    state: PanelState,
    sheet: HtmlElement,
    prefs: PreferenceStore<LocalStorage>,
    storage_key: String,
    drag: Option<DragListeners>,
}

pub type SharedSheet = Rc<RefCell<SheetController>>;

impl SheetController {
    pub fn new(sheet: HtmlElement, storage_key: &str) -> Self {
        let prefs = PreferenceStore::new(LocalStorage);
        let state = PanelState::restore(prefs.load(storage_key));
        let ctl = Self {
            state,
            sheet,
            prefs,
            storage_key: storage_key.to_string(),
            drag: None,
        };
        ctl.apply_height();
        ctl.apply_visibility();
        ctl
    }

    fn apply_height(&self) {
        let _ = self
            .sheet
            .style()
            .set_property("height", &format!("{}vh", self.state.height_vh()));
    }

    fn apply_visibility(&self) {
        let _ = self
            .sheet
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, !self.state.is_visible());
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
        self.apply_visibility();
    }

    fn cycle_size(&mut self) {
        let vh = self.state.cycle_size();
        self.apply_height();
        self.prefs.save(&self.storage_key, vh);
    }
}

/// Window listeners held only while the handle is pressed.
struct DragListeners {
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    mouse_up: Closure<dyn FnMut(MouseEvent)>,
    touch_move: Closure<dyn FnMut(TouchEvent)>,
    touch_end: Closure<dyn FnMut(TouchEvent)>,
}

fn non_passive() -> AddEventListenerOptions {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    opts
}

impl DragListeners {
    fn attach(window: &Window, shared: &SharedSheet) -> Result<Self, JsValue> {
        let mouse_move = {
            let shared = shared.clone();
            Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
                drag_to(&shared, event.client_y() as f64);
            }))
        };
        let mouse_up = {
            let shared = shared.clone();
            Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
                finish_drag(&shared);
            }))
        };
        let touch_move = {
            let shared = shared.clone();
            Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |event: TouchEvent| {
                if let Some(y) = touch_y(&event) {
                    event.prevent_default();
                    drag_to(&shared, y);
                }
            }))
        };
        let touch_end = {
            let shared = shared.clone();
            Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |_event: TouchEvent| {
                finish_drag(&shared);
            }))
        };

        let target: &EventTarget = window.as_ref();
        target.add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("mouseup", mouse_up.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            touch_move.as_ref().unchecked_ref(),
            &non_passive(),
        )?;
        target.add_event_listener_with_callback("touchend", touch_end.as_ref().unchecked_ref())?;

        Ok(Self {
            mouse_move,
            mouse_up,
            touch_move,
            touch_end,
        })
    }

    fn detach(&self, window: &Window) {
        let target: &EventTarget = window.as_ref();
        let listeners: [(&str, &JsValue); 4] = [
            ("mousemove", self.mouse_move.as_ref()),
            ("mouseup", self.mouse_up.as_ref()),
            ("touchmove", self.touch_move.as_ref()),
            ("touchend", self.touch_end.as_ref()),
        ];
        for (kind, callback) in listeners {
            let _ = target.remove_event_listener_with_callback(kind, callback.unchecked_ref());
        }
    }
}

fn touch_y(event: &TouchEvent) -> Option<f64> {
    event.touches().item(0).map(|t| t.client_y() as f64)
}

fn begin_drag(shared: &SharedSheet, pointer_y: f64) -> Result<(), JsValue> {
    let window = window()?;
    let mut ctl = shared.borrow_mut();
    let rendered_px = ctl.sheet.get_bounding_client_rect().height();
    if !ctl.state.begin_drag(pointer_y, rendered_px) {
        return Ok(());
    }
    match DragListeners::attach(&window, shared) {
        Ok(listeners) => {
            let _ = ctl.sheet.class_list().add_1(RESIZING_CLASS);
            ctl.drag = Some(listeners);
            Ok(())
        }
        Err(err) => {
            ctl.state.end_drag();
            Err(err)
        }
    }
}

fn drag_to(shared: &SharedSheet, pointer_y: f64) {
    let Some(viewport_px) = web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
    else {
        return;
    };
    let mut ctl = shared.borrow_mut();
    if ctl.state.drag_to(pointer_y, viewport_px).is_some() {
        ctl.apply_height();
    }
}

fn finish_drag(shared: &SharedSheet) {
    let listeners = {
        let mut ctl = shared.borrow_mut();
        let Some(vh) = ctl.state.end_drag() else {
            return;
        };
        let _ = ctl.sheet.class_list().remove_1(RESIZING_CLASS);
        ctl.prefs.save(&ctl.storage_key, vh);
        ctl.drag.take()
    };
    if let Some(listeners) = listeners {
        if let Some(window) = web_sys::window() {
            listeners.detach(&window);
        }
        // One of these closures is still on the stack; free them after it returns.
        spawn_local(async move {
            drop(listeners);
        });
    }
}

/// Wire mouse/touch drag and double-click cycling onto the handle.
pub fn enable_resize(shared: &SharedSheet, handle: &Element) -> Result<(), JsValue> {
    {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
            event.prevent_default();
            if let Err(err) = begin_drag(&shared, event.client_y() as f64) {
                web_sys::console::error_1(&err);
            }
        }));
        handle.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();
            let y = touch_y(&event).unwrap_or(0.0);
            if let Err(err) = begin_drag(&shared, y) {
                web_sys::console::error_1(&err);
            }
        }));
        handle.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &non_passive(),
        )?;
        closure.forget();
    }
    {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            shared.borrow_mut().cycle_size();
        }));
        handle.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn focus_of(event: &KeyboardEvent) -> FocusKind {
    let Some(el) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return FocusKind::Document;
    };
    let editable = el
        .dyn_ref::<HtmlElement>()
        .is_some_and(|h| h.is_content_editable());
    FocusKind::from_element(&el.tag_name(), editable)
}

/// Toggle on chip clicks and on the document-wide hotkey.
pub fn enable_toggle(
    shared: &SharedSheet,
    chip: &HtmlElement,
    hotkey: Hotkey,
) -> Result<(), JsValue> {
    {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            shared.borrow_mut().toggle();
        }));
        chip.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let shared = shared.clone();
        let on_key = move |event: KeyboardEvent| {
            let key = event.key();
            let press = KeyPress {
                key: &key,
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                alt: event.alt_key(),
                focus: focus_of(&event),
            };
            if hotkey.matches(&press) {
                shared.borrow_mut().toggle();
            }
        };
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(on_key));
        document()?.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
