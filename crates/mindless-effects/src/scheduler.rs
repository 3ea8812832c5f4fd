//! Per-frame callbacks and resize listeners.
//!
//! The host loop calls [`FrameScheduler::dispatch_frame`] once per frame and
//! [`FrameScheduler::dispatch_resize`] when the viewport changes. Every
//! registration returns a [`Subscription`] that unregisters on drop, so a
//! renderer's callbacks live exactly as long as the component holding them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use mindless_core::Viewport;

type FrameCallback = Box<dyn FnMut(Duration)>;
type ResizeCallback = Box<dyn FnMut(Viewport)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Frame,
    Resize,
}

enum Removed {
    Frame(FrameCallback),
    Resize(ResizeCallback),
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    frames: BTreeMap<u64, FrameCallback>,
    resize: BTreeMap<u64, ResizeCallback>,
    /// Callback currently being invoked, and whether it was cancelled meanwhile.
    in_flight: Option<(u64, bool)>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove(&mut self, kind: Kind, id: u64) -> Option<Removed> {
        let removed = match kind {
            Kind::Frame => self.frames.remove(&id).map(Removed::Frame),
            Kind::Resize => self.resize.remove(&id).map(Removed::Resize),
        };
        if removed.is_none() {
            if let Some((current, cancelled)) = self.in_flight.as_mut() {
                if *current == id {
                    *cancelled = true;
                }
            }
        }
        removed
    }
}

/// Registry of repaint callbacks, shared by every renderer on one screen.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("FrameScheduler")
            .field("frames", &registry.frames.len())
            .field("resize", &registry.resize.len())
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` with the frame time on every frame until the returned
    /// subscription is dropped.
    pub fn request_frames(&self, callback: impl FnMut(Duration) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.frames.insert(id, Box::new(callback));
        self.subscription(Kind::Frame, id)
    }

    /// Call `callback` with the new viewport on every resize until the
    /// returned subscription is dropped.
    pub fn on_resize(&self, callback: impl FnMut(Viewport) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.resize.insert(id, Box::new(callback));
        self.subscription(Kind::Resize, id)
    }

    fn subscription(&self, kind: Kind, id: u64) -> Subscription {
        Subscription {
            kind,
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live frame callbacks.
    pub fn frame_callbacks(&self) -> usize {
        self.registry.borrow().frames.len()
    }

    /// Number of live resize listeners.
    pub fn resize_listeners(&self) -> usize {
        self.registry.borrow().resize.len()
    }

    /// Run every frame callback registered before this call, in
    /// registration order.
    pub fn dispatch_frame(&self, now: Duration) {
        let ids: Vec<u64> = self.registry.borrow().frames.keys().copied().collect();
        for id in ids {
            let Some(mut callback) = self.take(Kind::Frame, id).and_then(|r| match r {
                Removed::Frame(cb) => Some(cb),
                Removed::Resize(_) => None,
            }) else {
                continue;
            };
            callback(now);
            let leftover = self.restore(id, Removed::Frame(callback));
            drop(leftover);
        }
    }

    /// Run every resize listener registered before this call.
    pub fn dispatch_resize(&self, viewport: Viewport) {
        let ids: Vec<u64> = self.registry.borrow().resize.keys().copied().collect();
        for id in ids {
            let Some(mut callback) = self.take(Kind::Resize, id).and_then(|r| match r {
                Removed::Resize(cb) => Some(cb),
                Removed::Frame(_) => None,
            }) else {
                continue;
            };
            callback(viewport);
            let leftover = self.restore(id, Removed::Resize(callback));
            drop(leftover);
        }
    }

    /// Remove a callback for invocation, marking it in flight.
    fn take(&self, kind: Kind, id: u64) -> Option<Removed> {
        let mut registry = self.registry.borrow_mut();
        let removed = registry.remove(kind, id);
        if removed.is_some() {
            registry.in_flight = Some((id, false));
        }
        removed
    }

    /// Put an invoked callback back unless it was cancelled while running.
    /// A cancelled callback is handed back so it drops outside the borrow.
    fn restore(&self, id: u64, callback: Removed) -> Option<Removed> {
        let mut registry = self.registry.borrow_mut();
        let cancelled = matches!(registry.in_flight.take(), Some((current, true)) if current == id);
        if cancelled {
            return Some(callback);
        }
        match callback {
            Removed::Frame(cb) => {
                registry.frames.insert(id, cb);
            }
            Removed::Resize(cb) => {
                registry.resize.insert(id, cb);
            }
        }
        None
    }
}

/// Handle to a registered callback. Dropping it cancels the registration.
#[must_use = "dropping a subscription cancels it immediately"]
#[derive(Debug)]
pub struct Subscription {
    kind: Kind,
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Cancel explicitly. Equivalent to dropping.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // the callback may own other subscriptions, so drop it after the borrow ends
        let removed = registry.borrow_mut().remove(self.kind, self.id);
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn frames_reach_callbacks_until_dropped() {
        let scheduler = FrameScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let sub = scheduler.request_frames(move |now| log.borrow_mut().push(now));
        scheduler.dispatch_frame(ms(16));
        scheduler.dispatch_frame(ms(33));
        assert_eq!(scheduler.frame_callbacks(), 1);

        drop(sub);
        scheduler.dispatch_frame(ms(50));
        assert_eq!(*seen.borrow(), vec![ms(16), ms(33)]);
        assert_eq!(scheduler.frame_callbacks(), 0);
    }

    #[test]
    fn resize_listeners_are_independent() {
        let scheduler = FrameScheduler::new();
        let sizes = Rc::new(RefCell::new(Vec::new()));

        let log = sizes.clone();
        let resize = scheduler.on_resize(move |vp| log.borrow_mut().push(vp));
        let frames = scheduler.request_frames(|_| {});

        scheduler.dispatch_resize(Viewport::new(500, 400));
        resize.cancel();
        scheduler.dispatch_resize(Viewport::new(1, 1));

        assert_eq!(*sizes.borrow(), vec![Viewport::new(500, 400)]);
        assert_eq!(scheduler.resize_listeners(), 0);
        assert_eq!(scheduler.frame_callbacks(), 1);
        drop(frames);
    }

    #[test]
    fn callback_can_cancel_itself() {
        let scheduler = FrameScheduler::new();
        let count = Rc::new(RefCell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let counter = count.clone();
        let own = slot.clone();
        let sub = scheduler.request_frames(move |_| {
            *counter.borrow_mut() += 1;
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        scheduler.dispatch_frame(ms(1));
        scheduler.dispatch_frame(ms(2));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(scheduler.frame_callbacks(), 0);
    }

    #[test]
    fn callbacks_registered_during_dispatch_run_next_frame() {
        let scheduler = FrameScheduler::new();
        let count = Rc::new(RefCell::new(0));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let inner = scheduler.clone();
        let counter = count.clone();
        let store = late.clone();
        let _first = scheduler.request_frames(move |_| {
            if store.borrow().is_empty() {
                let counter = counter.clone();
                let sub = inner.request_frames(move |_| *counter.borrow_mut() += 1);
                store.borrow_mut().push(sub);
            }
        });

        scheduler.dispatch_frame(ms(1));
        assert_eq!(*count.borrow(), 0);
        scheduler.dispatch_frame(ms(2));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn subscription_outliving_scheduler_is_harmless() {
        let scheduler = FrameScheduler::new();
        let sub = scheduler.request_frames(|_| {});
        drop(scheduler);
        drop(sub);
    }
}
