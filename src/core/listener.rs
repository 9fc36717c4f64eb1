//! Scoped listener registration.
//!
//! A [`ListenerSet`] hands out [`Subscription`] guards.  The callback stays
//! registered exactly as long as its guard lives, so a view that drops its
//! guards on teardown can never be called back afterwards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
}

/// Single-threaded set of event callbacks.
pub struct ListenerSet<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> ListenerSet<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `callback`.  It is removed when the returned guard drops.
    pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push((id, Box::new(callback)));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|(eid, _)| *eid != id);
                }
            })),
        }
    }

    /// Deliver `event` to every live callback, in registration order.
    pub fn emit(&self, event: &E) {
        // Callbacks must not subscribe/unsubscribe re-entrantly.
        let mut reg = self.inner.borrow_mut();
        for (_, cb) in reg.entries.iter_mut() {
            cb(event);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl<E: 'static> Default for ListenerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered callback.  Dropping it deregisters the callback.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dropping_guard_deregisters() {
        let set = ListenerSet::<u32>::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let sub = set.subscribe(move |v| h.set(h.get() + *v));
        set.emit(&2);
        assert_eq!(hits.get(), 2);
        assert_eq!(set.len(), 1);

        drop(sub);
        set.emit(&5);
        assert_eq!(hits.get(), 2);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn guard_outliving_set_is_harmless() {
        let set = ListenerSet::<()>::new();
        let sub = set.subscribe(|_| {});
        drop(set);
        drop(sub);
    }

    #[test]
    fn only_the_dropped_callback_is_removed() {
        let set = ListenerSet::<()>::new();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));

        let ac = Rc::clone(&a);
        let sub_a = set.subscribe(move |_| ac.set(ac.get() + 1));
        let bc = Rc::clone(&b);
        let _sub_b = set.subscribe(move |_| bc.set(bc.get() + 1));

        drop(sub_a);
        set.emit(&());
        assert_eq!((a.get(), b.get()), (0, 1));
    }
}
