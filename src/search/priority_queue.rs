use std::collections::HashMap;
use std::hash::Hash;

/// Binary min-heap of ids keyed by priority, with in-place priority updates.
///
/// An id map tracks each entry's heap slot, so `add_or_update` and
/// `update_priority` are logarithmic. Ties between equal priorities pop in
/// no particular order.
#[derive(Debug, Clone)]
pub struct EventPriorityQueue<I, P> {
    heap: Vec<(P, I)>,
    slots: HashMap<I, usize>,
}

impl<I, P> Default for EventPriorityQueue<I, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<I, P> EventPriorityQueue<I, P>
where
    I: Eq + Hash + Clone,
    P: PartialOrd,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &I) -> bool {
        self.slots.contains_key(id)
    }

    /// Current priority of `id`, if queued.
    #[must_use]
    pub fn priority_of(&self, id: &I) -> Option<&P> {
        self.slots.get(id).map(|&slot| &self.heap[slot].0)
    }

    /// Queues `id` with `priority`, or replaces its priority if already queued.
    pub fn add_or_update(&mut self, id: I, priority: P) {
        if let Some(&slot) = self.slots.get(&id) {
            self.reprioritize(slot, priority);
            return;
        }
        let slot = self.heap.len();
        self.slots.insert(id.clone(), slot);
        self.heap.push((priority, id));
        self.sift_up(slot);
    }

    /// Replaces the priority of a queued `id`. Returns `false` and does
    /// nothing when `id` is not queued.
    pub fn update_priority(&mut self, id: &I, priority: P) -> bool {
        let Some(&slot) = self.slots.get(id) else {
            return false;
        };
        self.reprioritize(slot, priority);
        true
    }

    /// The minimum entry without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<(&P, &I)> {
        self.heap.first().map(|(p, id)| (p, id))
    }

    /// Removes and returns the minimum entry.
    pub fn pop_min(&mut self) -> Option<(P, I)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (priority, id) = self.heap.pop()?;
        self.slots.remove(&id);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((priority, id))
    }

    fn reprioritize(&mut self, slot: usize, priority: P) {
        let lower = priority < self.heap[slot].0;
        self.heap[slot].0 = priority;
        if lower {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(s) = self.slots.get_mut(&self.heap[a].1) {
            *s = a;
        }
        if let Some(s) = self.slots.get_mut(&self.heap[b].1) {
            *s = b;
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].0 < self.heap[parent].0 {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < n && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < n && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

impl<I> EventPriorityQueue<I, f64>
where
    I: Eq + Hash + Clone,
{
    /// Queue for a shortest-path search: the first id at priority 0,
    /// every other id at infinity.
    #[must_use]
    pub fn seeded<T>(ids: T) -> Self
    where
        T: IntoIterator<Item = I>,
    {
        let mut queue = Self::new();
        for (i, id) in ids.into_iter().enumerate() {
            let priority = if i == 0 { 0.0 } else { f64::INFINITY };
            queue.add_or_update(id, priority);
        }
        queue
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut queue = EventPriorityQueue::new();
        for (id, p) in [("c", 3.0), ("a", 1.0), ("e", 5.0), ("b", 2.0), ("d", 4.0)] {
            queue.add_or_update(id, p);
        }
        let order: Vec<&str> = std::iter::from_fn(|| queue.pop_min().map(|(_, id)| id)).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
        assert!(queue.is_empty());
        assert!(queue.pop_min().is_none());
    }

    #[test]
    fn add_or_update_is_last_write_wins() {
        let mut queue = EventPriorityQueue::new();
        queue.add_or_update(1, 10);
        queue.add_or_update(2, 20);
        queue.add_or_update(3, 30);
        queue.add_or_update(3, 5);
        queue.add_or_update(1, 40);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.priority_of(&1), Some(&40));
        assert_eq!(queue.peek_min(), Some((&5, &3)));
        assert_eq!(queue.pop_min(), Some((5, 3)));
        assert_eq!(queue.pop_min(), Some((20, 2)));
        assert_eq!(queue.pop_min(), Some((40, 1)));
    }

    #[test]
    fn update_priority_ignores_absent_ids() {
        let mut queue = EventPriorityQueue::new();
        queue.add_or_update('x', 1);
        assert!(!queue.update_priority(&'y', 0));
        assert!(queue.update_priority(&'x', 7));
        assert!(!queue.contains(&'y'));
        assert_eq!(queue.pop_min(), Some((7, 'x')));
    }

    #[test]
    fn seeded_queue_starts_at_first_id() {
        let mut queue = EventPriorityQueue::seeded(["s", "t", "u"]);
        assert_eq!(queue.len(), 3);
        let (p, id) = queue.pop_min().unwrap();
        assert_eq!(id, "s");
        assert!(p.abs() < f64::EPSILON);
        queue.update_priority(&"u", 2.5);
        assert_eq!(queue.pop_min().unwrap().1, "u");
        assert!(queue.priority_of(&"t").unwrap().is_infinite());
    }

    #[test]
    fn many_updates_keep_heap_consistent() {
        let mut queue = EventPriorityQueue::new();
        for i in 0..100_u32 {
            queue.add_or_update(i, (i * 37) % 101);
        }
        for i in (0..100_u32).step_by(3) {
            queue.add_or_update(i, 1000 - i);
        }
        let mut last = 0;
        while let Some((p, _)) = queue.pop_min() {
            assert!(p >= last);
            last = p;
        }
    }
}
