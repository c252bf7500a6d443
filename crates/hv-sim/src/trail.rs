use std::collections::VecDeque;

use hv_bee::Footprint;

/// Bounded store of live footprints, oldest first.
#[derive(Clone, Debug, Default)]
pub struct TrailBuffer {
    entries:  VecDeque<Footprint>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.min(4_096)), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `print`, dropping the oldest entries beyond the capacity.
    pub fn push(&mut self, print: Footprint) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(print);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Age every entry by one frame and drop the expired ones.  Returns the
    /// number dropped.
    pub fn age(&mut self) -> usize {
        let before = self.entries.len();
        for print in &mut self.entries {
            print.age = print.age.saturating_add(1);
        }
        self.entries.retain(|p| !p.is_expired());
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Footprint> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
