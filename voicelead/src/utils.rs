use std::time::{Duration, Instant};

/// A wall-clock cut-off, checked cooperatively by the search loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    end: Instant,
}

impl Deadline {
    pub(crate) fn after(timeout: Duration) -> Self {
        Deadline {
            end: Instant::now() + timeout,
        }
    }

    pub(crate) fn expired(self) -> bool {
        Instant::now() >= self.end
    }
}
