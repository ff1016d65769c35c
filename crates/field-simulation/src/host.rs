//! Host environment seen by the animator
//!
//! A host owns the drawing surface, the display-refresh scheduler and the
//! event listeners. The animator only talks to it through [`Host`], so the
//! same lifecycle runs against a real window or against [`ManualHost`].

use glam::Vec2;

/// Drawing surface dimensions in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// `None` unless both dimensions are finite and positive
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        (usable(width) && usable(height)).then_some(Self { width, height })
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Ticket for one scheduled frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Ticket for one registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerMove,
    TouchMove,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 3] = [
        ListenerKind::Resize,
        ListenerKind::PointerMove,
        ListenerKind::TouchMove,
    ];
}

/// Input delivered by the host to a registered listener
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resize(SurfaceSize),
    PointerMove(Vec2),
    /// Position of the first active touch, if any
    TouchMove(Option<Vec2>),
}

impl HostEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            HostEvent::Resize(_) => ListenerKind::Resize,
            HostEvent::PointerMove(_) => ListenerKind::PointerMove,
            HostEvent::TouchMove(_) => ListenerKind::TouchMove,
        }
    }
}

pub trait Host {
    /// Current drawing surface, `None` while it is unavailable
    fn surface_size(&self) -> Option<SurfaceSize>;

    /// Ask for a callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a previously requested frame. Unknown or stale handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Unknown ids are ignored
    fn remove_listener(&mut self, id: ListenerId);

    fn has_listener(&self, kind: ListenerKind) -> bool;
}

/// Bookkeeping for registered listeners, shared by host implementations
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerKind)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, kind));
        id
    }

    /// Returns whether `id` was registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.entries.iter().any(|(_, entry)| *entry == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Host driven by hand: frames fire only when [`ManualHost::tick`] is called.
///
/// Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualHost {
    surface: Option<SurfaceSize>,
    next_frame: u64,
    pending: Option<FrameHandle>,
    listeners: ListenerRegistry,
    frames_requested: u64,
    frames_cancelled: u64,
}

impl ManualHost {
    pub fn new(surface: Option<SurfaceSize>) -> Self {
        Self {
            surface,
            ..Default::default()
        }
    }

    pub fn set_surface(&mut self, surface: Option<SurfaceSize>) {
        self.surface = surface;
    }

    /// Simulate one display refresh: hand out the pending frame, if any
    pub fn tick(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }
}

impl Host for ManualHost {
    fn surface_size(&self) -> Option<SurfaceSize> {
        self.surface
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame += 1;
        self.frames_requested += 1;
        let handle = FrameHandle::new(self.next_frame);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.frames_cancelled += 1;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_rejects_empty() {
        assert!(SurfaceSize::new(0.0, 600.0).is_none());
        assert!(SurfaceSize::new(800.0, 0.0).is_none());
        assert!(SurfaceSize::new(f32::NAN, 600.0).is_none());
        assert!(SurfaceSize::new(800.0, 600.0).is_some());
    }

    #[test]
    fn test_registry_add_remove() {
        let mut registry = ListenerRegistry::new();
        let resize = registry.add(ListenerKind::Resize);
        let pointer = registry.add(ListenerKind::PointerMove);

        assert_ne!(resize, pointer);
        assert!(registry.contains(ListenerKind::Resize));
        assert!(!registry.contains(ListenerKind::TouchMove));

        assert!(registry.remove(resize));
        assert!(!registry.remove(resize));
        assert!(!registry.contains(ListenerKind::Resize));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_manual_host_cancel_only_matching_frame() {
        let mut host = ManualHost::new(SurfaceSize::new(10.0, 10.0));
        let first = host.request_frame();
        let second = host.request_frame();

        host.cancel_frame(first);
        assert_eq!(host.pending_frame(), Some(second));

        host.cancel_frame(second);
        assert_eq!(host.tick(), None);
        assert_eq!(host.frames_cancelled(), 1);
    }
}
