use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::state::{Priority, ProcessKey, Ticks};

/// Ordering key of a ready process.
///
/// Greater means dispatched first: higher `priority`, then earlier
/// `arrival_time`, then lower admission `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub priority: Priority,
    pub arrival_time: Ticks,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so arrival and seq compare reversed
impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.arrival_time.cmp(&self.arrival_time))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Arrived, unfinished processes keyed by handle.
#[derive(Debug)]
pub struct ReadyPool {
    queue: KeyedPriorityQueue<ProcessKey, Precedence>,
}

impl ReadyPool {
    pub fn new() -> Self {
        Self {
            queue: KeyedPriorityQueue::new(),
        }
    }

    pub fn insert(&mut self, key: ProcessKey, precedence: Precedence) {
        let previous = self.queue.push(key, precedence);
        debug_assert!(
            previous.is_none(),
            "Process {key:?} already present in the ready pool"
        );
    }

    pub fn pop_best(&mut self) -> Option<ProcessKey> {
        self.queue.pop().map(|(key, _)| key)
    }

    pub fn peek(&self) -> Option<(ProcessKey, Precedence)> {
        self.queue.peek().map(|(key, precedence)| (*key, *precedence))
    }

    pub fn contains(&self, key: ProcessKey) -> bool {
        self.queue.get_priority(&key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessKey, Precedence)> + '_ {
        self.queue
            .iter()
            .map(|(key, precedence)| (*key, *precedence))
    }
}

impl Default for ReadyPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<ProcessKey> {
        let mut arena: SlotMap<ProcessKey, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn prec(priority: Priority, arrival_time: Ticks, seq: u64) -> Precedence {
        Precedence {
            priority,
            arrival_time,
            seq,
        }
    }

    #[test]
    fn higher_priority_wins() {
        assert!(prec(5, 9, 9) > prec(1, 0, 0));
        assert!(prec(-1, 0, 0) < prec(0, 3, 3));
    }

    #[test]
    fn earlier_arrival_breaks_priority_tie() {
        assert!(prec(5, 0, 7) > prec(5, 1, 0));
    }

    #[test]
    fn seq_breaks_full_tie() {
        assert!(prec(5, 2, 0) > prec(5, 2, 1));
        assert_eq!(prec(5, 2, 1).cmp(&prec(5, 2, 1)), Ordering::Equal);
    }

    #[test]
    fn pops_in_precedence_order() {
        let k = keys(4);
        let mut pool = ReadyPool::new();
        pool.insert(k[0], prec(1, 0, 0));
        pool.insert(k[1], prec(7, 3, 1));
        pool.insert(k[2], prec(7, 2, 2));
        pool.insert(k[3], prec(-4, 0, 3));

        assert_eq!(pool.len(), 4);
        assert_eq!(pool.peek().map(|(key, _)| key), Some(k[2]));
        let order: Vec<_> = std::iter::from_fn(|| pool.pop_best()).collect();
        assert_eq!(order, vec![k[2], k[1], k[0], k[3]]);
        assert!(pool.is_empty());
    }

    #[test]
    fn empty_pool_pops_none() {
        let mut pool = ReadyPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.pop_best(), None);
        assert_eq!(pool.peek(), None);
    }

    #[test]
    fn contains_tracks_membership() {
        let k = keys(2);
        let mut pool = ReadyPool::new();
        pool.insert(k[0], prec(1, 0, 0));
        assert!(pool.contains(k[0]));
        assert!(!pool.contains(k[1]));
        pool.pop_best();
        assert!(!pool.contains(k[0]));
    }
}
