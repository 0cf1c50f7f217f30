//! Latest-result-wins slots for asynchronous adapter results
//!
//! Each service-calling adapter owns one [`ResultSlot`]. Before issuing a
//! request it draws a [`Ticket`]; when the response arrives it commits with
//! that ticket, and the commit is accepted only if no newer ticket has been
//! drawn in the meantime. A superseded response is silently discarded, so a
//! stale reply can never overwrite the result of a newer request.

use std::sync::Mutex;

/// Correlation token for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Inner<T> {
    latest: u64,
    stored: Option<(u64, T)>,
}

/// A private, ticketed result holder
#[derive(Debug)]
pub struct ResultSlot<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: 0,
                stored: None,
            }),
        }
    }

    /// Draw a ticket for a new request, superseding all earlier tickets
    pub fn issue(&self) -> Ticket {
        let mut inner = self.inner.lock().expect("slot lock poisoned");
        inner.latest += 1;
        Ticket(inner.latest)
    }

    /// Commit a response. Returns true if the ticket was still the newest
    /// and the value was stored; false if the response was superseded.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut inner = self.inner.lock().expect("slot lock poisoned");
        if ticket.0 != inner.latest {
            return false;
        }
        inner.stored = Some((ticket.0, value));
        true
    }

    /// Discard the stored value and supersede any in-flight request.
    /// Called when the document changes so no stale result survives.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("slot lock poisoned");
        inner.latest += 1;
        inner.stored = None;
    }

    /// Whether a committed value is present
    pub fn is_filled(&self) -> bool {
        self.inner
            .lock()
            .expect("slot lock poisoned")
            .stored
            .is_some()
    }
}

impl<T: Clone> ResultSlot<T> {
    /// The most recently committed value, if any
    pub fn get(&self) -> Option<T> {
        self.inner
            .lock()
            .expect("slot lock poisoned")
            .stored
            .as_ref()
            .map(|(_, v)| v.clone())
    }
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
