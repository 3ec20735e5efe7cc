//! Browser frame loop on `requestAnimationFrame`
//!
//! The rAF closure only holds a weak reference back to the loop state, so
//! dropping the [`FrameLoop`] handle both cancels the pending frame and frees
//! the closure.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::core::FrameClock;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopState {
    /// Id of the pending animation frame
    pending: Cell<Option<i32>>,
    cancelled: Cell<bool>,
    frames: Cell<u64>,
    callback: RefCell<Option<FrameCallback>>,
}

impl LoopState {
    fn schedule(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = self.callback.borrow();
        if let Some(cb) = callback.as_ref() {
            let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            self.pending.set(Some(id));
        }
        Ok(())
    }
}

/// Handle to a running rAF chain
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    /// Start calling `on_frame` once per animation frame with seconds since
    /// the first frame.
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let state = Rc::new(LoopState {
            pending: Cell::new(None),
            cancelled: Cell::new(false),
            frames: Cell::new(0),
            callback: RefCell::new(None),
        });

        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let mut clock = FrameClock::new();
        let tick = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            if state.cancelled.get() {
                return;
            }
            on_frame(clock.elapsed(timestamp_ms / 1000.0));
            state.frames.set(state.frames.get() + 1);
            if let Err(e) = state.schedule() {
                error!(?e, "Failed to request animation frame");
            }
        }) as Box<dyn FnMut(f64)>);

        *state.callback.borrow_mut() = Some(tick);
        state.schedule()?;
        debug!("Frame loop started");
        Ok(Self { state })
    }

    pub fn is_running(&self) -> bool {
        !self.state.cancelled.get()
    }

    pub fn frames(&self) -> u64 {
        self.state.frames.get()
    }

    /// Cancel the pending frame and release the callback. Returns frames run.
    ///
    /// Must not be called from inside the frame callback itself.
    pub fn cancel(&self) -> u64 {
        let state = &self.state;
        if !state.cancelled.replace(true) {
            if let Some(id) = state.pending.take() {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.cancel_animation_frame(id) {
                        error!(?e, "Failed to cancel animation frame");
                    }
                }
            }
            state.callback.borrow_mut().take();
            debug!(frames = state.frames.get(), "Frame loop stopped");
        }
        state.frames.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
