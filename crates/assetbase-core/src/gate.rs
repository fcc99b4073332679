//! Stale-response discipline for overlapping requests.
//!
//! Callers that can issue overlapping asynchronous reads (a debounced
//! search racing a refresh, a logout racing a profile load) take a
//! ticket per request and apply a response only while its ticket is
//! still the latest issued. Later-issued requests deterministically win
//! regardless of completion order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation counter.
#[derive(Debug, Default)]
pub struct RequestGate {
    seq: AtomicU64,
}

/// Proof of a request's position in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request generation, invalidating all earlier tickets.
    pub fn issue(&self) -> Ticket {
        Ticket(self.seq.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether a response carrying this ticket may still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.seq.load(Ordering::Acquire) == ticket.0
    }

    /// Invalidate all outstanding tickets without starting a request
    /// (used on teardown, e.g. logout).
    pub fn invalidate_all(&self) {
        self.seq.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_wins() {
        let gate = RequestGate::new();
        let first = gate.issue();
        let second = gate.issue();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn invalidate_all_discards_outstanding() {
        let gate = RequestGate::new();
        let t = gate.issue();
        gate.invalidate_all();
        assert!(!gate.is_current(t));
    }
}
