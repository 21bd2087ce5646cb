// queue.rs - Per-tick work lists (duty cycle and frame register)

/// Ordered list of cell indices waiting for one pass of work.
///
/// Entries are taken out as a whole before any of them runs, so anything
/// enqueued while a pass is in progress waits for the next pass.
#[derive(Debug, Clone, Default)]
pub struct TickQueue {
    entries: Vec<usize>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, cell: usize) {
        self.entries.push(cell);
    }

    /// Swaps in an empty list and hands back everything queued so far, in insertion order.
    pub fn take_pass(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending(&self) -> &[usize] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
