//! Host implementation backed by a winit window
//!
//! Frame requests map onto `Window::request_redraw`, so the animation runs at
//! the display's redraw rate and stops as soon as nothing asks for a frame.

use field_simulation::{
    FrameHandle, Host, ListenerId, ListenerKind, ListenerRegistry, SurfaceSize,
};
use glam::Vec2;
use std::sync::Arc;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

pub struct WindowHost {
    window: Arc<Window>,
    listeners: ListenerRegistry,
    pending: Option<FrameHandle>,
    next_frame: u64,
}

impl WindowHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            listeners: ListenerRegistry::new(),
            pending: None,
            next_frame: 0,
        }
    }

    /// Take the frame requested for this redraw, if any.
    ///
    /// Redraws the OS asks for on its own (exposure, resize) find nothing here
    /// and only repaint the last frame.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    pub fn logical_size(&self, size: PhysicalSize<u32>) -> Option<SurfaceSize> {
        let logical = size.to_logical::<f32>(self.scale_factor());
        SurfaceSize::new(logical.width, logical.height)
    }

    pub fn logical_position(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.scale_factor());
        Vec2::new(logical.x, logical.y)
    }
}

impl Host for WindowHost {
    fn surface_size(&self) -> Option<SurfaceSize> {
        if self.window.is_minimized() == Some(true) {
            return None;
        }
        self.logical_size(self.window.inner_size())
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        let handle = FrameHandle::new(self.next_frame);
        self.pending = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // A redraw already queued with winit still arrives, but finds no frame.
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.listeners.add(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(kind)
    }
}
