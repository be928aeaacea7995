//! Browser frame scheduling and timers

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::FrameScheduler;

/// `requestAnimationFrame` / `cancelAnimationFrame`
///
/// The callback is installed once, after the driver that owns this scheduler
/// exists, and reused for every frame.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl AnimationFrameScheduler {
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl std::fmt::Debug for AnimationFrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationFrameScheduler")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let callback = self.callback.as_ref()?;
        let window = web_sys::window()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

/// A pending `setTimeout`, cleared on drop
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Run `f` once after `delay_ms`
    pub fn new<F: FnOnce() + 'static>(delay_ms: u32, f: F) -> Option<Self> {
        let mut f = Some(f);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        });
        let window = web_sys::window()?;
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|e| log::error!("setTimeout failed: {:?}", e))
            .ok()?;
        Some(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}
