//! Dense external ID assignment for a batch of exported products.

/// Hands out sequential external product IDs.
///
/// Owned by the batch driver and passed down explicitly so two batches never
/// share counter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
    step: u64,
}

impl IdAllocator {
    /// A `step` of zero is treated as one.
    #[must_use]
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: start,
            step: step.max(1),
        }
    }

    /// Returns the next ID and advances the counter.
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(self.step);
        id
    }

    /// The ID the next call to [`IdAllocator::allocate`] will return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_from_start_with_step() {
        let mut ids = IdAllocator::new(87, 1);
        assert_eq!(ids.allocate(), 87);
        assert_eq!(ids.allocate(), 88);
        assert_eq!(ids.peek(), 89);
    }

    #[test]
    fn honours_larger_step() {
        let mut ids = IdAllocator::new(1000, 10);
        assert_eq!(ids.allocate(), 1000);
        assert_eq!(ids.allocate(), 1010);
    }

    #[test]
    fn zero_step_becomes_one() {
        let mut ids = IdAllocator::new(5, 0);
        ids.allocate();
        assert_eq!(ids.peek(), 6);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let mut ids = IdAllocator::new(u64::MAX, 1);
        assert_eq!(ids.allocate(), u64::MAX);
        assert_eq!(ids.peek(), u64::MAX);
    }
}
