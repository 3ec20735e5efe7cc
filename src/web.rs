//! Browser entry point
//!
//! Mounts the particle sphere into `#canvas-container` and exposes the lead
//! form checks to the page script. A page without the container simply gets
//! no sphere.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, MouseEvent, Window,
};

use crate::core::form::{validate_lead, Captcha, LeadForm};
use crate::core::{SphereConfig, Viewport};
use crate::errors::SphereError;
use crate::frame_loop_wasm::FrameLoop;
use crate::render::CanvasRenderer;
use crate::sphere::ParticleSphere;

/// Element the sphere canvas is appended to
const CONTAINER_ID: &str = "canvas-container";

type SharedSphere = Rc<RefCell<ParticleSphere<CanvasRenderer>>>;

/// Event listener registration, detached again on drop
struct Listener<T: ?Sized> {
    target: EventTarget,
    event: &'static str,
    callback: Closure<T>,
}

impl<T: ?Sized> Listener<T> {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        callback: Closure<T>,
    ) -> Result<Self, SphereError> {
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(surface_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl<T: ?Sized> Drop for Listener<T> {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!(?e, event = self.event, "Failed to detach listener");
        }
    }
}

/// Canvas appended to the container, removed from the page on drop
struct AttachedCanvas(HtmlCanvasElement);

impl Drop for AttachedCanvas {
    fn drop(&mut self) {
        self.0.remove();
    }
}

/// A mounted sphere: frame loop, listeners and canvas, torn down together
struct MountedSphere {
    frame_loop: FrameLoop,
    _on_pointer: Listener<dyn FnMut(MouseEvent)>,
    _on_resize: Listener<dyn FnMut()>,
    _canvas: AttachedCanvas,
}

impl Drop for MountedSphere {
    fn drop(&mut self) {
        let frames = self.frame_loop.cancel();
        info!(frames, "Particle sphere unmounted");
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<MountedSphere>> = const { RefCell::new(None) };
}

fn surface_err(e: JsValue) -> SphereError {
    SphereError::Surface(format!("{:?}", e))
}

fn element_viewport(el: &Element) -> Viewport {
    Viewport::new(el.client_width() as f32, el.client_height() as f32)
}

fn window_viewport(window: &Window) -> Viewport {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

/// Canvas plus 2D context, or None when the browser refuses a 2D context
fn create_surface(
    document: &Document,
    container: &Element,
    pixel_ratio: f64,
) -> Result<Option<(AttachedCanvas, CanvasRenderer)>, SphereError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(surface_err)?
        .dyn_into()
        .map_err(|_| SphereError::Surface("created element is not a canvas".into()))?;

    let ctx = match canvas.get_context("2d").map_err(surface_err)? {
        Some(obj) => obj
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SphereError::Surface("2d context has unexpected type".into()))?,
        None => return Ok(None),
    };

    container.append_child(&canvas).map_err(surface_err)?;
    let attached = AttachedCanvas(canvas.clone());
    Ok(Some((attached, CanvasRenderer::new(canvas, ctx, pixel_ratio))))
}

/// Each step owns what it attached, so an early return detaches the
/// listeners and removes the canvas added so far.
fn mount(config: &SphereConfig) -> Result<Option<MountedSphere>, SphereError> {
    let window = web_sys::window().ok_or_else(|| SphereError::Surface("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SphereError::Surface("no document".into()))?;
    let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
        debug!(id = CONTAINER_ID, "No sphere container on this page");
        return Ok(None);
    };

    let (canvas, surface) =
        create_surface(&document, &container, window.device_pixel_ratio())?.unzip();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (Some(canvas), Some(sphere)) = (
        canvas,
        ParticleSphere::init(config, surface, element_viewport(&container), &mut rng),
    ) else {
        return Ok(None);
    };
    let sphere: SharedSphere = Rc::new(RefCell::new(sphere));

    // Pointer offset is relative to the window center, not the container
    let s = sphere.clone();
    let w = window.clone();
    let on_pointer = Listener::attach(
        &document,
        "mousemove",
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let vp = window_viewport(&w);
            s.borrow_mut()
                .pointer_moved(e.client_x() as f32, e.client_y() as f32, vp);
        }) as Box<dyn FnMut(MouseEvent)>),
    )?;

    let s = sphere.clone();
    let on_resize = Listener::attach(
        &window,
        "resize",
        Closure::wrap(Box::new(move || {
            s.borrow_mut().resized(element_viewport(&container));
        }) as Box<dyn FnMut()>),
    )?;

    let s = sphere;
    let frame_loop = FrameLoop::start(move |elapsed| {
        s.borrow_mut().frame(elapsed);
    })
    .map_err(surface_err)?;

    Ok(Some(MountedSphere {
        frame_loop,
        _on_pointer: on_pointer,
        _on_resize: on_resize,
        _canvas: canvas,
    }))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    match mount(&SphereConfig::default()) {
        Ok(Some(mounted)) => MOUNTED.with(|m| *m.borrow_mut() = Some(mounted)),
        Ok(None) => {}
        Err(e) => debug!(error = %e, "Particle sphere not mounted"),
    }
}

/// Stop the frame loop, detach listeners and remove the canvas
#[wasm_bindgen(js_name = unmountSphere)]
pub fn unmount_sphere() {
    MOUNTED.with(|m| m.borrow_mut().take());
}

/// Validation failure reported to the page
#[wasm_bindgen(getter_with_clone)]
pub struct FormIssue {
    /// Input to highlight: "phone", "captcha" or "policy"
    pub field: String,
    pub message: String,
}

/// Check the lead form. Returns nothing when the form may be submitted.
#[wasm_bindgen(js_name = validateLeadForm)]
pub fn validate_lead_form(
    phone: &str,
    captcha_answer: &str,
    a: u32,
    b: u32,
    policy_accepted: bool,
) -> Option<FormIssue> {
    let form = LeadForm {
        phone: phone.to_string(),
        captcha_answer: captcha_answer.to_string(),
        policy_accepted,
    };
    validate_lead(&form, &Captcha { a, b }).err().map(|e| FormIssue {
        field: e.field().to_string(),
        message: e.to_string(),
    })
}

/// New captcha operands `[a, b]`, each in `1..=max`
#[wasm_bindgen(js_name = newCaptcha)]
pub fn new_captcha(max: u32) -> Vec<u32> {
    let c = Captcha::generate(&mut rand::thread_rng(), max);
    vec![c.a, c.b]
}
