use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one poll request. Tickets are totally ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing tickets. Ticket 0 is never issued.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Tracks the newest applied ticket. A response is accepted only if its
/// request was issued after the one currently shown (last request wins).
#[derive(Debug, Default, Clone, Copy)]
pub struct AppliedMark {
    last: u64,
}

impl AppliedMark {
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if ticket.0 > self.last {
            self.last = ticket.0;
            true
        } else {
            false
        }
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}
