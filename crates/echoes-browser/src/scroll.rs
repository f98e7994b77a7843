//! Scroll sampling.
//!
//! Embedders that only see absolute offsets (the page bridge reports
//! `scrollY`) turn them into `(previous, current)` pairs here.

use echoes_types::event::ScrollSample;

#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    last: i32,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new offset and return the pair it forms with the last one.
    pub fn sample(&mut self, offset: i32) -> ScrollSample {
        let sample = ScrollSample::new(self.last, offset);
        self.last = offset;
        sample
    }

    /// A freshly loaded page starts at the top.
    pub fn reset(&mut self) {
        self.last = 0;
    }

    pub fn last_offset(&self) -> i32 {
        self.last
    }
}
