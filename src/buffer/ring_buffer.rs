//! # Ring Buffer Implementation
//!
//! A fixed-size circular buffer that overwrites old elements when full.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots.
//! When all spots are full and a new car arrives,
//! the oldest car is towed away to make room.

/// A fixed-capacity ring buffer.
///
/// ## Properties
/// - Fixed capacity (doesn't grow)
/// - O(1) push operation
/// - Automatically discards oldest when full
/// - Maintains insertion order
///
/// ## Representation
///
/// Storage is a boxed slice of exactly `capacity` slots, each holding
/// either nothing or one item (`Option<T>` - emptiness is a type-level
/// fact, not a sentinel). The `next_write` cursor marks the slot that
/// receives the next push. Once the buffer has wrapped, that same slot
/// also holds the oldest surviving item, so iteration starts there.
#[derive(Debug)]
pub struct RingBuffer<T> {
    /// The slot array; `None` means the slot has never been filled
    slots: Box<[Option<T>]>,

    /// Index of the slot that receives the next push
    next_write: usize,

    /// Number of occupied slots (saturates at capacity)
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the given capacity.
    ///
    /// ## Panics
    ///
    /// Panics if `capacity` is zero - a zero-slot ring has no defined
    /// wrap-around semantics. Callers validate capacity up front (see
    /// [`Config::validate`]).
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    ///
    /// ## Example
    /// ```
    /// # use fifotail::buffer::RingBuffer;
    /// let buffer: RingBuffer<i32> = RingBuffer::new(100);
    /// assert_eq!(buffer.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots: slots.into_boxed_slice(),
            next_write: 0,
            len: 0,
        }
    }

    /// Adds an item to the buffer.
    ///
    /// The item lands in the slot at `next_write`. If that slot is already
    /// occupied (the normal steady state once the buffer has wrapped), the
    /// old item is dropped first - that is the defining overwrite behavior,
    /// not an error. Never fails, never blocks.
    pub fn push(&mut self, item: T) {
        if self.slots[self.next_write].is_none() {
            self.len += 1;
        }
        self.slots[self.next_write] = Some(item);
        self.next_write = (self.next_write + 1) % self.slots.len();
    }

    /// Returns the number of items currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns an iterator over all items (oldest to newest).
    ///
    /// Starts at `next_write` and walks every slot exactly once, skipping
    /// empty ones. Before the first wrap `next_write` points at an empty
    /// slot, so the walk naturally begins at slot 0 where the oldest item
    /// lives; after wrapping, `next_write` is the oldest item itself.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (tail, head) = self.slots.split_at(self.next_write);
        head.iter().chain(tail.iter()).filter_map(Option::as_ref)
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer: RingBuffer<i32> = RingBuffer::new(5);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        let _buffer: RingBuffer<i32> = RingBuffer::new(0);
    }

    #[test]
    fn test_push_single() {
        let mut buffer = RingBuffer::new(5);
        buffer.push(42);

        assert!(!buffer.is_empty());
        assert_eq!(buffer.len(), 1);

        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![42]);
    }

    #[test]
    fn test_push_multiple() {
        let mut buffer = RingBuffer::new(5);

        for i in 1..=3 {
            buffer.push(i);
        }

        assert_eq!(buffer.len(), 3);

        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![1, 2, 3]);
    }

    #[test]
    fn test_capacity_bound() {
        // After k pushes, occupied slots == min(k, capacity).
        let mut buffer = RingBuffer::new(4);

        for k in 1..=10 {
            buffer.push(k);
            assert_eq!(buffer.len(), k.min(4));
        }
    }

    #[test]
    fn test_overflow() {
        let mut buffer = RingBuffer::new(3);

        // Add 5 items to capacity-3 buffer
        for i in 1..=5 {
            buffer.push(i);
        }

        // Should only have 3, 4, 5
        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![3, 4, 5]);
    }

    #[test]
    fn test_overwrite_order_one_past_capacity() {
        // Storing capacity + 1 items retains items 2..=capacity+1.
        let mut buffer = RingBuffer::new(3);

        for i in 1..=4 {
            buffer.push(i);
        }

        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![2, 3, 4]);
    }

    #[test]
    fn test_order_across_many_wraps() {
        let mut buffer = RingBuffer::new(3);

        // Wrap around many times; iteration order must stay oldest-first.
        for i in 0..100 {
            buffer.push(i);
        }

        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![97, 98, 99]);
    }

    #[test]
    fn test_is_full() {
        let mut buffer = RingBuffer::new(3);

        assert!(!buffer.is_full());
        buffer.push(1);
        buffer.push(2);
        assert!(!buffer.is_full());
        buffer.push(3);
        assert!(buffer.is_full());
        buffer.push(4);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_iterator_skips_empty_slots() {
        let mut buffer = RingBuffer::new(5);

        buffer.push("a");
        buffer.push("b");

        // Three slots are still empty; they must not appear.
        let collected: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(collected, vec!["a", "b"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = RingBuffer::new(1);

        buffer.push(1);
        buffer.push(2);
        buffer.push(3);

        assert_eq!(buffer.len(), 1);
        let all: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(all, vec![3]);
    }
}
