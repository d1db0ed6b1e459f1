// Browser run-loop for a particle field. Grabs a canvas from the DOM, keeps it
// sized to the viewport, and steps the field once per animation frame until
// the returned handle is stopped or dropped.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::surface::CanvasSurface;
use crate::utils::Timer;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

struct LoopState {
    window: Window,
    canvas: HtmlCanvasElement,
    field: RefCell<ParticleField>,
    surface: RefCell<CanvasSurface>,
    running: Cell<bool>,
    profile: Cell<bool>,
    frame_id: Cell<Option<i32>>,
    frame_callback: RefCell<Option<Closure<dyn FnMut()>>>,
    resize_callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn frame(&self) {
        if !self.running.get() {
            return;
        }
        self.frame_id.set(None);
        {
            let _timer = if self.profile.get() {
                Some(Timer::new("ParticleField::step"))
            } else {
                None
            };
            let mut field = self.field.borrow_mut();
            let mut surface = self.surface.borrow_mut();
            field.step(&mut *surface);
        }
        self.schedule();
    }

    fn schedule(&self) {
        if !self.running.get() {
            return;
        }
        let callback = self.frame_callback.borrow();
        if let Some(callback) = callback.as_ref() {
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => self.frame_id.set(Some(id)),
                Err(e) => {
                    error!(?e, "requestAnimationFrame failed, stopping");
                    self.running.set(false);
                }
            }
        }
    }

    fn resize(&self) {
        let (width, height) = viewport_size(&self.window);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.borrow_mut().resize(width, height);
        debug!(width, height, "canvas resized");
    }

    // Also cleans up after a loop that halted itself on a scheduling error
    fn stop(&self) {
        let was_running = self.running.replace(false);
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!(?e, "cancelAnimationFrame failed");
            }
        }
        if let Some(callback) = self.resize_callback.borrow_mut().take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            {
                warn!(?e, "failed to remove resize listener");
            }
        }
        self.frame_callback.borrow_mut().take();
        if was_running {
            info!("particle animation stopped");
        }
    }
}

// Falls back to an empty surface when the viewport can't be measured
fn viewport_size(window: &Window) -> (u32, u32) {
    let measure = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        measure(window.inner_width()) as u32,
        measure(window.inner_height()) as u32,
    )
}

fn find_canvas(window: &Window, canvas_id: &str) -> Result<HtmlCanvasElement, FieldError> {
    window
        .document()
        .ok_or(FieldError::NoDocument)?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FieldError::ElementNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FieldError::NotACanvas(canvas_id.to_owned()))
}

/// Controls a running particle background. Dropping the handle stops it.
#[wasm_bindgen]
pub struct AnimationHandle {
    state: Rc<LoopState>,
}

#[wasm_bindgen]
impl AnimationHandle {
    /// Starts the default background on the canvas with the given id.
    pub fn start(canvas_id: &str) -> Result<AnimationHandle, JsValue> {
        AnimationHandle::start_with(canvas_id, FieldConfig::default())
    }

    /// Same as `start`, with a JSON object overriding any of the defaults.
    pub fn start_with_config(canvas_id: &str, config_json: &str) -> Result<AnimationHandle, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        AnimationHandle::start_with(canvas_id, config)
    }

    /// Cancels the pending frame and detaches the resize listener. The canvas
    /// keeps its last frame. Calling it again does nothing.
    pub fn stop(&self) {
        self.state.stop();
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub fn particle_count(&self) -> usize {
        self.state.field.borrow().len()
    }

    /// Wraps every frame in a devtools console timer.
    pub fn set_profile(&self, enabled: bool) {
        self.state.profile.set(enabled);
    }
}

impl AnimationHandle {
    pub fn start_with(canvas_id: &str, config: FieldConfig) -> Result<AnimationHandle, JsValue> {
        crate::initialize();
        let window = web_sys::window().ok_or(FieldError::NoWindow)?;
        let canvas = find_canvas(&window, canvas_id)?;
        let context = canvas
            .get_context("2d")?
            .ok_or(FieldError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::ContextUnavailable)?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);
        let field = ParticleField::new(config, width, height)?;

        let state = Rc::new(LoopState {
            window,
            canvas,
            field: RefCell::new(field),
            surface: RefCell::new(CanvasSurface::new(context)),
            running: Cell::new(true),
            profile: Cell::new(false),
            frame_id: Cell::new(None),
            frame_callback: RefCell::new(None),
            resize_callback: RefCell::new(None),
        });

        // Callbacks hold weak references so the handle alone owns the loop
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let on_frame = Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.frame();
            }
        }) as Box<dyn FnMut()>);
        *state.frame_callback.borrow_mut() = Some(on_frame);

        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.resize();
            }
        }) as Box<dyn FnMut()>);
        state
            .window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        *state.resize_callback.borrow_mut() = Some(on_resize);

        info!(
            canvas_id,
            width,
            height,
            particles = state.field.borrow().len(),
            "particle animation started"
        );
        state.schedule();
        Ok(AnimationHandle { state })
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.state.stop();
    }
}
