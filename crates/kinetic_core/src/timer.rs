//! Deferred action queue
//!
//! A single-threaded stand-in for a UI thread's delayed message queue.
//! Actions are posted with a delay relative to a virtual clock and handed
//! back, in due order, when the clock is advanced past their due time.
//! Posted actions cannot be cancelled.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TimerId;
}

struct Pending<T> {
    due: Duration,
    /// Post order, breaks ties between actions due at the same instant
    seq: u64,
    payload: T,
}

/// Virtual-clock queue of one-shot deferred payloads
pub struct DeferredQueue<T> {
    pending: SlotMap<TimerId, Pending<T>>,
    now: Duration,
    next_seq: u64,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Post a payload to fire `delay` after the current virtual time
    pub fn post(&mut self, delay: Duration, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        tracing::trace!("deferred action #{} due at {:?}", seq, due);
        self.pending.insert(Pending { due, seq, payload })
    }

    /// Due time of a posted payload that has not fired yet
    pub fn due_at(&self, id: TimerId) -> Option<Duration> {
        self.pending.get(id).map(|p| p.due)
    }

    /// Earliest due time among pending payloads
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Advance the clock by `by` and return every payload now due,
    /// ordered by due time then post order
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let target = self.now.saturating_add(by);
        self.advance_to(target)
    }

    /// Advance the clock to `target` (never backwards) and return every
    /// payload now due
    pub fn advance_to(&mut self, target: Duration) -> Vec<T> {
        if target > self.now {
            self.now = target;
        }

        let now = self.now;
        let mut due: SmallVec<[(Duration, u64, TimerId); 8]> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(id, p)| (p.due, p.seq, id))
            .collect();
        due.sort_unstable_by_key(|&(at, seq, _)| (at, seq));

        due.into_iter()
            .filter_map(|(_, _, id)| self.pending.remove(id))
            .map(|p| p.payload)
            .collect()
    }

    /// Number of payloads still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_only_when_due() {
        let mut queue = DeferredQueue::new();
        queue.post(ms(200), "reset");

        assert!(queue.advance(ms(199)).is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.advance(ms(1)), vec!["reset"]);
        assert!(queue.is_empty());
        assert_eq!(queue.now(), ms(200));
    }

    #[test]
    fn test_due_order_then_post_order() {
        let mut queue = DeferredQueue::new();
        queue.post(ms(50), 'c');
        queue.post(ms(10), 'a');
        queue.post(ms(50), 'd');
        queue.post(ms(10), 'b');

        assert_eq!(queue.next_due(), Some(ms(10)));
        assert_eq!(queue.advance(ms(100)), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_delay_is_relative_to_post_time() {
        let mut queue = DeferredQueue::new();
        queue.advance(ms(30));
        let id = queue.post(ms(20), 1u8);
        assert_eq!(queue.due_at(id), Some(ms(50)));

        assert!(queue.advance_to(ms(49)).is_empty());
        assert_eq!(queue.advance_to(ms(50)), vec![1]);
        assert_eq!(queue.due_at(id), None);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut queue: DeferredQueue<()> = DeferredQueue::new();
        queue.advance(ms(100));
        queue.advance_to(ms(10));
        assert_eq!(queue.now(), ms(100));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut queue = DeferredQueue::new();
        queue.post(Duration::ZERO, 7);
        assert_eq!(queue.advance(Duration::ZERO), vec![7]);
    }
}
