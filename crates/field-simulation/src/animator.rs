//! Lifecycle of the hero particle field
//!
//! ```text
//! Idle --mount--> Running --unmount--> Stopped
//!   ^               |  ^
//!   |               +--+ on_frame (requests the next frame)
//!   +-- mount without a surface
//! ```
//!
//! Running is the only state holding host resources: one pending frame and one
//! listener per [`ListenerKind`]. Leaving it releases both, and dropping a
//! running animator leaves it.

use field_physics::PointerState;
use rand::rngs::StdRng;
use rand::Rng;

use crate::field::ParticleField;
use crate::frame::FrameOutput;
use crate::host::{FrameHandle, Host, HostEvent, ListenerId, ListenerKind};
use crate::params::FieldParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Stopped,
}

/// Counters for frames run and events delivered since construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimatorStats {
    pub frames: u64,
    pub events: u64,
    pub regenerations: u64,
}

struct Mounted {
    field: ParticleField,
    pending: FrameHandle,
    listeners: [ListenerId; 3],
}

enum Phase {
    Idle,
    Running(Mounted),
    Stopped,
}

pub struct Animator<H: Host, R: Rng = StdRng> {
    host: H,
    rng: R,
    params: FieldParams,
    pointer: PointerState,
    phase: Phase,
    frame: FrameOutput,
    stats: AnimatorStats,
}

impl<H: Host, R: Rng> Animator<H, R> {
    pub fn new(host: H, params: FieldParams, rng: R) -> Self {
        Self {
            host,
            rng,
            params,
            pointer: PointerState::default(),
            phase: Phase::Idle,
            frame: FrameOutput::default(),
            stats: AnimatorStats::default(),
        }
    }

    pub fn state(&self) -> AnimatorState {
        match self.phase {
            Phase::Idle => AnimatorState::Idle,
            Phase::Running(_) => AnimatorState::Running,
            Phase::Stopped => AnimatorState::Stopped,
        }
    }

    /// Spawn the field, register listeners and request the first frame.
    ///
    /// Only valid from Idle. Without a drawing surface this does nothing and
    /// the animator stays Idle, so a later call may try again. Returns whether
    /// the animator is now running.
    pub fn mount(&mut self) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            return matches!(self.phase, Phase::Running(_));
        }

        let Some(size) = self.host.surface_size() else {
            log::debug!("mount skipped: no drawing surface yet");
            return false;
        };

        let field = ParticleField::new(size, &self.params, &mut self.rng);
        self.stats.regenerations += 1;

        let listeners = ListenerKind::ALL.map(|kind| self.host.add_listener(kind));
        let pending = self.host.request_frame();

        log::info!(
            "particle field running: {} particles on {:.0}x{:.0}",
            field.particles().len(),
            size.width,
            size.height
        );

        self.phase = Phase::Running(Mounted {
            field,
            pending,
            listeners,
        });
        true
    }

    /// Run the frame identified by `handle`.
    ///
    /// Steps the field, rebuilds the frame output and requests the next frame
    /// before returning. Handles other than the pending one, and any frame
    /// outside Running, are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<&FrameOutput> {
        let Phase::Running(mounted) = &mut self.phase else {
            log::trace!("frame {:?} ignored: animator not running", handle);
            return None;
        };
        if mounted.pending != handle {
            log::trace!(
                "frame {:?} ignored: pending is {:?}",
                handle,
                mounted.pending
            );
            return None;
        }

        mounted.field.step(&self.pointer, &self.params);
        mounted.field.write_frame(&self.params, &mut self.frame);
        mounted.pending = self.host.request_frame();
        self.stats.frames += 1;

        Some(&self.frame)
    }

    /// Deliver a host event to the matching listener.
    ///
    /// Returns whether a listener took it. Nothing is delivered unless the
    /// animator is running and the host still has a listener of that kind.
    pub fn dispatch(&mut self, event: HostEvent) -> bool {
        let Phase::Running(mounted) = &mut self.phase else {
            return false;
        };
        if !self.host.has_listener(event.kind()) {
            return false;
        }

        match event {
            HostEvent::Resize(size) => {
                mounted.field.regenerate(size, &self.params, &mut self.rng);
                self.stats.regenerations += 1;
            }
            HostEvent::PointerMove(position) => self.pointer = PointerState::at(position),
            HostEvent::TouchMove(Some(position)) => self.pointer = PointerState::at(position),
            HostEvent::TouchMove(None) => return false,
        }

        self.stats.events += 1;
        true
    }

    /// Respawn the particle set in place, e.g. after spawn parameters changed
    pub fn regenerate(&mut self) {
        if let Phase::Running(mounted) = &mut self.phase {
            let size = mounted.field.size();
            mounted.field.regenerate(size, &self.params, &mut self.rng);
            self.stats.regenerations += 1;
        }
    }

    /// Cancel the pending frame, remove every listener and stop for good
    pub fn unmount(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running(mounted) => {
                self.host.cancel_frame(mounted.pending);
                for id in mounted.listeners {
                    self.host.remove_listener(id);
                }
                self.frame.clear();
                log::info!(
                    "particle field stopped after {} frames",
                    self.stats.frames
                );
            }
            Phase::Idle => log::debug!("unmounted before the field ever ran"),
            Phase::Stopped => {}
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Motion and link parameters apply from the next frame; spawn parameters
    /// from the next regeneration
    pub fn params_mut(&mut self) -> &mut FieldParams {
        &mut self.params
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn field(&self) -> Option<&ParticleField> {
        match &self.phase {
            Phase::Running(mounted) => Some(&mounted.field),
            _ => None,
        }
    }

    /// Output of the most recent frame
    pub fn frame(&self) -> &FrameOutput {
        &self.frame
    }

    pub fn stats(&self) -> AnimatorStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host, R: Rng> Drop for Animator<H, R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualHost, SurfaceSize};
    use glam::Vec2;
    use rand::SeedableRng;

    fn animator(width: f32, height: f32) -> Animator<ManualHost> {
        Animator::new(
            ManualHost::new(SurfaceSize::new(width, height)),
            FieldParams::default(),
            StdRng::seed_from_u64(42),
        )
    }

    /// Run the host's pending frame, if any
    fn tick(animator: &mut Animator<ManualHost>) -> bool {
        match animator.host_mut().tick() {
            Some(handle) => animator.on_frame(handle).is_some(),
            None => false,
        }
    }

    #[test]
    fn test_mount_starts_running() {
        let mut animator = animator(1280.0, 720.0);
        assert_eq!(animator.state(), AnimatorState::Idle);

        assert!(animator.mount());
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(animator.host().listeners().len(), 3);
        assert!(animator.host().pending_frame().is_some());
        assert_eq!(animator.field().map(|f| f.particles().len()), Some(90));
    }

    #[test]
    fn test_mount_without_surface_is_noop() {
        let mut animator = Animator::new(
            ManualHost::new(None),
            FieldParams::default(),
            StdRng::seed_from_u64(1),
        );

        assert!(!animator.mount());
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert!(animator.host().listeners().is_empty());
        assert!(animator.host().pending_frame().is_none());
        assert!(animator.field().is_none());

        // Surface shows up later: mounting again works.
        animator
            .host_mut()
            .set_surface(SurfaceSize::new(800.0, 600.0));
        assert!(animator.mount());
        assert_eq!(animator.state(), AnimatorState::Running);
    }

    #[test]
    fn test_each_frame_requests_the_next() {
        let mut animator = animator(800.0, 600.0);
        animator.mount();

        for _ in 0..10 {
            assert!(tick(&mut animator));
            assert!(animator.host().pending_frame().is_some());
        }
        assert_eq!(animator.stats().frames, 10);
        assert_eq!(animator.host().frames_requested(), 11);
        assert_eq!(animator.frame().glows.len(), 60);
    }

    #[test]
    fn test_stale_frame_handle_is_ignored() {
        let mut animator = animator(800.0, 600.0);
        animator.mount();

        let stale = animator.host_mut().tick().unwrap();
        assert!(animator.on_frame(stale).is_some());
        assert!(animator.on_frame(stale).is_none());
        assert_eq!(animator.stats().frames, 1);
    }

    #[test]
    fn test_pointer_and_touch_events() {
        let mut animator = animator(800.0, 600.0);
        assert!(animator.pointer().is_sentinel());
        assert!(!animator.dispatch(HostEvent::PointerMove(Vec2::new(5.0, 5.0))));

        animator.mount();
        assert!(animator.dispatch(HostEvent::PointerMove(Vec2::new(10.0, 20.0))));
        assert_eq!(animator.pointer().position, Vec2::new(10.0, 20.0));

        assert!(animator.dispatch(HostEvent::TouchMove(Some(Vec2::new(30.0, 40.0)))));
        assert_eq!(animator.pointer().position, Vec2::new(30.0, 40.0));

        assert!(!animator.dispatch(HostEvent::TouchMove(None)));
        assert_eq!(animator.pointer().position, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_resize_regenerates_whole_field() {
        let mut animator = animator(500.0, 800.0);
        animator.mount();
        tick(&mut animator);

        let before: Vec<[f32; 2]> = animator
            .field()
            .unwrap()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();
        assert_eq!(before.len(), 40);

        let resized = SurfaceSize::new(1200.0, 800.0).unwrap();
        animator.host_mut().set_surface(Some(resized));
        assert!(animator.dispatch(HostEvent::Resize(resized)));

        let field = animator.field().unwrap();
        assert_eq!(field.particles().len(), 90);
        assert_eq!(field.size(), resized);
        assert!(field.particles().iter().all(|p| !before.contains(&p.position)));
    }

    #[test]
    fn test_teardown_stops_frames_and_listeners() {
        let mut animator = animator(1024.0, 768.0);
        animator.mount();
        tick(&mut animator);
        tick(&mut animator);

        let stats = animator.stats();
        animator.unmount();

        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert!(animator.host().pending_frame().is_none());
        assert!(animator.host().listeners().is_empty());
        assert_eq!(animator.host().frames_cancelled(), 1);

        // One more simulated refresh plus a burst of input: nothing fires.
        assert!(!tick(&mut animator));
        assert!(!animator.dispatch(HostEvent::PointerMove(Vec2::new(1.0, 1.0))));
        assert!(!animator.dispatch(HostEvent::Resize(
            SurfaceSize::new(300.0, 300.0).unwrap()
        )));
        assert_eq!(animator.stats(), stats);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut animator = animator(800.0, 600.0);
        animator.mount();
        animator.unmount();

        assert!(!animator.mount());
        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert!(animator.host().listeners().is_empty());
    }

    #[test]
    fn test_unmount_from_idle_stops() {
        let mut animator = animator(800.0, 600.0);
        animator.unmount();
        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert_eq!(animator.host().frames_requested(), 0);
    }

    /// Host that records releases in a shared log, so they can be observed
    /// after the animator owning it is gone.
    struct SharedHost {
        inner: ManualHost,
        log: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
    }

    impl Host for SharedHost {
        fn surface_size(&self) -> Option<SurfaceSize> {
            self.inner.surface_size()
        }
        fn request_frame(&mut self) -> FrameHandle {
            self.inner.request_frame()
        }
        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.log.borrow_mut().push("cancel_frame");
            self.inner.cancel_frame(handle);
        }
        fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
            self.inner.add_listener(kind)
        }
        fn remove_listener(&mut self, id: ListenerId) {
            self.log.borrow_mut().push("remove_listener");
            self.inner.remove_listener(id);
        }
        fn has_listener(&self, kind: ListenerKind) -> bool {
            self.inner.has_listener(kind)
        }
    }

    #[test]
    fn test_drop_releases_host_resources() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let host = SharedHost {
                inner: ManualHost::new(SurfaceSize::new(640.0, 480.0)),
                log: log.clone(),
            };
            let mut animator =
                Animator::new(host, FieldParams::default(), StdRng::seed_from_u64(9));
            animator.mount();
        }

        assert_eq!(
            log.borrow().as_slice(),
            &[
                "cancel_frame",
                "remove_listener",
                "remove_listener",
                "remove_listener"
            ]
        );
    }
}
