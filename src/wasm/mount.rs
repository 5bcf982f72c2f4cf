//! Browser lifecycle: `start` wires a [`Backdrop`] to `requestAnimationFrame`,
//! `setTimeout`, and the window's resize and pointer events; `stop` unwinds it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, Window};

use super::render::{describe, js_error, GlSurface};
use crate::backdrop::{Backdrop, FrameOutcome};
use crate::config::{BackdropConfig, BackdropOptions, Preset};
use crate::error::{BackdropError, Result};
use crate::host::TimerHost;
use crate::pointer::{self, DecayStep, DecayTicket};
use crate::viewport::Viewport;

type Core = Backdrop<BrowserTimers, GlSurface>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `setTimeout` with a single callback that routes back into the backdrop.
pub struct BrowserTimers {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl TimerHost for BrowserTimers {
    type Handle = i32;

    fn set_timeout(&mut self, delay_ms: f64) -> Result<i32> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                delay_ms.round() as i32,
            )
            .map_err(js_error)
    }

    fn clear_timeout(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

struct Shared {
    core: Core,
    /// Pending render frame.
    frame: Option<i32>,
    /// Pending fade frame and the ticket it belongs to.
    decay: Option<(DecayTicket, i32)>,
}

struct Mounted {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    on_frame: FrameSlot,
    on_decay: FrameSlot,
    on_resize: Closure<dyn FnMut()>,
    on_pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
    torn_down: bool,
}

impl Mounted {
    fn attach(&mut self) -> Result<()> {
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .map_err(js_error)?;
        if let Some(on_pointer) = &self.on_pointer {
            self.window
                .add_event_listener_with_callback("pointermove", on_pointer.as_ref().unchecked_ref())
                .map_err(js_error)?;
        }
        let id = request_frame(&self.window, &self.on_frame)?;
        self.shared.borrow_mut().frame = id;
        Ok(())
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let mut shared = self.shared.borrow_mut();
        if let Some(id) = shared.frame.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        if let Some((_, id)) = shared.decay.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        if let Some(on_pointer) = &self.on_pointer {
            self.window
                .remove_event_listener_with_callback("pointermove", on_pointer.as_ref().unchecked_ref())
                .ok();
        }
        // Clears the strike timer, deletes GL objects and removes the canvas.
        shared.core.stop();
        drop(shared);

        self.on_frame.borrow_mut().take();
        self.on_decay.borrow_mut().take();
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Handle returned to the page. Call `stop()` when the view unmounts.
#[wasm_bindgen]
pub struct BackdropHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Cancel frames and timers, remove listeners, free GPU objects and
    /// detach the canvas. Further calls do nothing.
    pub fn stop(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.teardown();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.shared.borrow().core.is_running())
    }

    /// Seconds of animation so far; `NaN` once stopped.
    pub fn time(&self) -> f64 {
        self.mounted
            .as_ref()
            .map_or(f64::NAN, |m| m.shared.borrow().core.uniforms().time())
    }

    #[wasm_bindgen(js_name = lightningIntensity)]
    pub fn lightning_intensity(&self) -> f32 {
        self.mounted.as_ref().map_or(f32::NAN, |m| {
            m.shared.borrow().core.uniforms().lightning_intensity()
        })
    }
}

/// Mount a backdrop into `container`.
#[wasm_bindgen]
pub fn start(container: Option<HtmlElement>, options: JsValue) -> std::result::Result<BackdropHandle, JsValue> {
    mount(container, &options)
        .map(|mounted| BackdropHandle { mounted: Some(mounted) })
        .map_err(|err| {
            log::error!("backdrop failed to start: {err}");
            JsValue::from_str(&err.to_string())
        })
}

/// Mount into the element with the given id.
#[wasm_bindgen(js_name = startById)]
pub fn start_by_id(id: &str, options: JsValue) -> std::result::Result<BackdropHandle, JsValue> {
    let container = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    start(container, options)
}

/// Ids of the built-in presets.
#[wasm_bindgen]
pub fn presets() -> js_sys::Array {
    Preset::all()
        .iter()
        .map(|p| JsValue::from_str(p.id()))
        .collect()
}

fn mount(container: Option<HtmlElement>, options: &JsValue) -> Result<Mounted> {
    // Preconditions first: no GPU work happens for a bad target or bad options.
    let container = container.ok_or(BackdropError::MissingContainer)?;
    if !container.is_connected() {
        return Err(BackdropError::DetachedContainer(container.id()));
    }
    let config = BackdropConfig::resolve(&parse_options(options)?)?;
    let window = web_sys::window().ok_or_else(|| BackdropError::Host("no window".into()))?;

    let viewport = measure(&window, &container, &config);
    let surface = GlSurface::create(&container, config.preset)?;
    let now = now_ms(&window);
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

    let shared = Rc::new_cyclic(|weak: &Weak<RefCell<Shared>>| {
        let weak = weak.clone();
        let on_timer = Closure::wrap(Box::new(move || {
            let Some(shared) = weak.upgrade() else { return };
            if let Err(err) = shared.borrow_mut().core.on_strike_timer() {
                log::error!("lightning scheduler stopped: {err}");
            }
        }) as Box<dyn FnMut()>);
        let timers = BrowserTimers {
            window: window.clone(),
            callback: on_timer,
        };
        RefCell::new(Shared {
            core: Backdrop::new(config.clone(), viewport, surface, timers, now, seed),
            frame: None,
            decay: None,
        })
    });

    let started = shared.borrow_mut().core.start();
    if let Err(err) = started {
        shared.borrow_mut().core.stop();
        return Err(err);
    }

    let on_frame: FrameSlot = Rc::new(RefCell::new(None));
    *on_frame.borrow_mut() = Some(frame_loop(&window, &shared, &on_frame));

    let on_decay: FrameSlot = Rc::new(RefCell::new(None));
    *on_decay.borrow_mut() = Some(decay_loop(&window, &shared, &on_decay));

    let on_resize = {
        let window = window.clone();
        let container = container.clone();
        let weak = Rc::downgrade(&shared);
        Closure::wrap(Box::new(move || {
            let Some(shared) = weak.upgrade() else { return };
            let mut shared = shared.borrow_mut();
            let viewport = measure(&window, &container, shared.core.config());
            if let Err(err) = shared.core.resize(viewport) {
                log::warn!("backdrop resize failed: {err}");
            }
        }) as Box<dyn FnMut()>)
    };

    let on_pointer = config
        .enable_mouse_smoke
        .then(|| pointer_handler(&window, &container, &shared, &on_decay));

    let mut mounted = Mounted {
        window,
        shared,
        on_frame,
        on_decay,
        on_resize,
        on_pointer,
        torn_down: false,
    };
    // On failure `mounted` drops here and tears down whatever was attached.
    mounted.attach()?;
    log::info!("backdrop mounted with preset `{}`", config.preset.id());
    Ok(mounted)
}

fn frame_loop(window: &Window, shared: &Rc<RefCell<Shared>>, slot: &FrameSlot) -> Closure<dyn FnMut(f64)> {
    let window = window.clone();
    let weak = Rc::downgrade(shared);
    let slot = Rc::downgrade(slot);
    Closure::wrap(Box::new(move |now: f64| {
        let (Some(shared), Some(slot)) = (weak.upgrade(), slot.upgrade()) else {
            return;
        };
        let mut shared = shared.borrow_mut();
        shared.frame = None;
        if shared.core.frame(now) == FrameOutcome::Stopped {
            return;
        }
        match request_frame(&window, &slot) {
            Ok(id) => shared.frame = id,
            Err(err) => log::error!("render loop halted: {err}"),
        }
    }) as Box<dyn FnMut(f64)>)
}

fn decay_loop(window: &Window, shared: &Rc<RefCell<Shared>>, slot: &FrameSlot) -> Closure<dyn FnMut(f64)> {
    let window = window.clone();
    let weak = Rc::downgrade(shared);
    let slot = Rc::downgrade(slot);
    Closure::wrap(Box::new(move |now: f64| {
        let (Some(shared), Some(slot)) = (weak.upgrade(), slot.upgrade()) else {
            return;
        };
        let mut shared = shared.borrow_mut();
        let Some((ticket, _)) = shared.decay.take() else { return };
        if shared.core.decay_tick(ticket, now) != DecayStep::Continue {
            return;
        }
        match request_frame(&window, &slot) {
            Ok(Some(id)) => shared.decay = Some((ticket, id)),
            Ok(None) => {}
            Err(err) => log::warn!("pointer smoke fade halted: {err}"),
        }
    }) as Box<dyn FnMut(f64)>)
}

fn pointer_handler(
    window: &Window,
    container: &HtmlElement,
    shared: &Rc<RefCell<Shared>>,
    decay_slot: &FrameSlot,
) -> Closure<dyn FnMut(MouseEvent)> {
    let window = window.clone();
    let container = container.clone();
    let weak = Rc::downgrade(shared);
    let slot = Rc::downgrade(decay_slot);
    Closure::wrap(Box::new(move |event: MouseEvent| {
        let (Some(shared), Some(slot)) = (weak.upgrade(), slot.upgrade()) else {
            return;
        };
        let rect = container.get_bounding_client_rect();
        let Some((x, y)) = pointer::normalize(
            event.client_x() as f64,
            event.client_y() as f64,
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
        ) else {
            return;
        };

        let mut shared = shared.borrow_mut();
        let Some(ticket) = shared.core.pointer_moved(x, y, now_ms(&window)) else {
            return;
        };
        // Only the newest fade may run.
        if let Some((_, id)) = shared.decay.take() {
            window.cancel_animation_frame(id).ok();
        }
        match request_frame(&window, &slot) {
            Ok(Some(id)) => shared.decay = Some((ticket, id)),
            Ok(None) => {}
            Err(err) => log::warn!("pointer smoke fade not scheduled: {err}"),
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<Option<i32>> {
    match slot.borrow().as_ref() {
        Some(callback) => window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(Some)
            .map_err(js_error),
        None => Ok(None),
    }
}

fn parse_options(options: &JsValue) -> Result<BackdropOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(BackdropOptions::default());
    }
    let json = js_sys::JSON::stringify(options)
        .map_err(|e| BackdropError::InvalidConfig(describe(&e)))?;
    // Functions and symbols stringify to `undefined`.
    let json = json
        .as_string()
        .ok_or_else(|| BackdropError::InvalidConfig("options must be a plain object".into()))?;
    BackdropOptions::from_json(&json)
}

fn measure(window: &Window, container: &HtmlElement, config: &BackdropConfig) -> Viewport {
    Viewport::new(
        container.client_width() as f64,
        container.client_height() as f64,
        config.pixel_ratio(window.device_pixel_ratio()),
    )
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
