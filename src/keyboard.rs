use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether a key should keep travelling to the host after a listener saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

type Handler = Rc<RefCell<dyn FnMut(&KeyEvent) -> Propagation>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Global key stream of the host. Cloning shares the same listener list.
#[derive(Clone, Default)]
pub struct KeyHub {
    inner: Rc<RefCell<HubInner>>,
}

impl KeyHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&KeyEvent) -> Propagation + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        inner.handlers.push((id, handler));
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Offers `key` to every listener in subscription order until one stops it.
    pub fn dispatch(&self, key: &KeyEvent) -> Propagation {
        // Snapshot so handlers may subscribe or unsubscribe while running.
        let handlers = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect::<Vec<_>>();
        for handler in handlers {
            let outcome = (&mut *handler.borrow_mut())(key);
            if outcome == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }
}

/// Keeps a listener registered; dropping it removes the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.hub.upgrade() else {
            return;
        };
        inner
            .borrow_mut()
            .handlers
            .retain(|(id, _)| *id != self.id);
    }
}

/// Cmd+K or Ctrl+K.
pub fn is_toggle_shortcut(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('k')
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}
