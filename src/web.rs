// Browser glue: finds the canvas, feeds window events into the animator and
// drives it from requestAnimationFrame until the page stops it.

use crate::animator::Animator;
use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::countdown::Countdown;
use crate::error::{js_message, SetupError};
use crate::logging;
use crate::scheduler::{AnimationFrameScheduler, FrameLoop};
use crate::surface::{Size, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, Window};

type WebAnimator = Animator<CanvasSurface, StdRng>;

/// An attached DOM listener, detached again on drop.
struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, SetupError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(EventListener {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to detach `{}` listener: {}", self.event, js_message(&err));
        }
    }
}

struct Mounted {
    animator: Rc<RefCell<WebAnimator>>,
    frame_loop: FrameLoop<AnimationFrameScheduler>,
    _pointer_listener: EventListener,
    _resize_listener: EventListener,
}

/// Handle to a running background. Dropping it (or calling `stop`) detaches
/// every listener and cancels the pending frame.
#[wasm_bindgen]
pub struct ParticleBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// False when the background could not attach to the page.
    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |mounted| mounted.frame_loop.is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.animator.borrow().particles().len())
    }

    pub fn stop(&mut self) {
        // Dropping `mounted` detaches both listeners.
        if let Some(mounted) = self.mounted.take() {
            mounted.frame_loop.cancel();
            mounted.animator.borrow_mut().teardown();
        }
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Attaches the particle background to the canvas with id `canvas_id`.
/// `config_json` may override any `FieldConfig` key; a bad config falls back
/// to the defaults. Never throws: without a usable canvas the returned handle
/// simply does nothing.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> ParticleBackground {
    logging::init();
    let config = match config_json {
        Some(json) => FieldConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!("ignoring particle config: {}", err);
            FieldConfig::default()
        }),
        None => FieldConfig::default(),
    };
    match mount(canvas_id, config) {
        Ok(mounted) => ParticleBackground {
            mounted: Some(mounted),
        },
        Err(err) => {
            log::warn!("particle background disabled: {}", err);
            ParticleBackground { mounted: None }
        }
    }
}

/// Checks a config without starting anything, throwing the reason it is
/// rejected.
#[wasm_bindgen]
pub fn validate_config(config_json: &str) -> Result<(), JsValue> {
    FieldConfig::from_json(config_json)
        .map(|_| ())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    logging::set_level(level)
        .map(|_| ())
        .map_err(|_| JsValue::from_str(&format!("unknown log level `{}`", level)))
}

/// `[days, hours, minutes, seconds]` left until `launch_ms` (epoch
/// milliseconds), or `undefined` once it has passed.
#[wasm_bindgen]
pub fn countdown_until(launch_ms: f64) -> Option<Vec<u32>> {
    Countdown::until(launch_ms, js_sys::Date::now()).map(|countdown| {
        vec![
            countdown.days,
            countdown.hours,
            countdown.minutes,
            countdown.seconds,
        ]
    })
}

fn mount(canvas_id: &str, config: FieldConfig) -> Result<Mounted, SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;

    let mut surface = CanvasSurface::find(&document, canvas_id)?;
    if let Some(size) = viewport_size(&window) {
        surface.resize(size);
    }

    let mut animator = Animator::new(config, StdRng::from_entropy());
    if !animator.init(Some(surface)) {
        return Err(SetupError::NotStarted);
    }
    let animator = Rc::new(RefCell::new(animator));
    let target: &EventTarget = window.as_ref();

    let pointer_listener = {
        let animator = animator.clone();
        EventListener::attach(target, "mousemove", move |event: Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                animator
                    .borrow_mut()
                    .on_pointer_move(event.client_x() as f64, event.client_y() as f64);
            }
        })?
    };

    let resize_listener = {
        let animator = animator.clone();
        let window = window.clone();
        EventListener::attach(target, "resize", move |_: Event| {
            if let Some(size) = viewport_size(&window) {
                animator.borrow_mut().on_resize(size.width, size.height);
            }
        })?
    };

    let frame_loop = {
        let animator = animator.clone();
        FrameLoop::start(AnimationFrameScheduler::new(window.clone()), move || {
            #[cfg(feature = "frame-timing")]
            let _timer = logging::FrameTimer::new("glowfield::step");
            animator.borrow_mut().step();
        })
    };

    Ok(Mounted {
        animator,
        frame_loop,
        _pointer_listener: pointer_listener,
        _resize_listener: resize_listener,
    })
}

fn viewport_size(window: &Window) -> Option<Size> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}
