use std::cmp::Ordering;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node of a [`StatusTree`].
    pub struct NodeId;
}

/// A total order over keys, evaluated on demand.
///
/// The order may depend on external state (a sweep position, say). The tree
/// never caches comparison results, so the caller only has to make sure the
/// order agrees with the tree's current layout whenever it is passed in.
pub trait KeyOrder<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> KeyOrder<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u32,
}

/// Keys accepted by a locator in [`StatusTree::span_by`], plus the nearest key
/// on either side of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a, K> {
    pub before: Option<&'a K>,
    pub matching: Vec<&'a K>,
    pub after: Option<&'a K>,
}

/// Height-balanced (AVL) binary search tree over caller-ordered keys.
///
/// The tree holds no comparator of its own: every operation that needs to
/// order keys takes a [`KeyOrder`]. Nodes live in a slotmap arena and carry
/// only child links; predecessor and successor are found top-down.
#[derive(Debug, Clone)]
pub struct StatusTree<K> {
    nodes: SlotMap<NodeId, Node<K>>,
    root: Option<NodeId>,
}

impl<K> Default for StatusTree<K> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }
}

impl<K> StatusTree<K> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height_of(self.root) as usize
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts `key`. Returns `false` (and drops `key`) when an equal key is
    /// already present.
    pub fn insert<O>(&mut self, key: K, order: &O) -> bool
    where
        O: KeyOrder<K> + ?Sized,
    {
        let (root, inserted) = self.insert_at(self.root, key, order);
        self.root = Some(root);
        inserted
    }

    /// Removes and returns the key equal to `key`, if present.
    pub fn remove<O>(&mut self, key: &K, order: &O) -> Option<K>
    where
        O: KeyOrder<K> + ?Sized,
    {
        let (root, removed) = self.remove_at(self.root, key, order);
        self.root = root;
        removed
    }

    /// The stored key equal to `key`.
    #[must_use]
    pub fn find<O>(&self, key: &K, order: &O) -> Option<&K>
    where
        O: KeyOrder<K> + ?Sized,
    {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match order.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.key),
            };
        }
        None
    }

    #[must_use]
    pub fn contains<O>(&self, key: &K, order: &O) -> bool
    where
        O: KeyOrder<K> + ?Sized,
    {
        self.find(key, order).is_some()
    }

    /// The keys immediately before and after `key` in tree order.
    ///
    /// `key` does not need to be stored. Nothing is modified.
    #[must_use]
    pub fn predecessor_successor<O>(&self, key: &K, order: &O) -> (Option<&K>, Option<&K>)
    where
        O: KeyOrder<K> + ?Sized,
    {
        let mut pred = None;
        let mut succ = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            match order.compare(key, &node.key) {
                Ordering::Less => {
                    succ = Some(id);
                    cur = node.left;
                }
                Ordering::Greater => {
                    pred = Some(id);
                    cur = node.right;
                }
                Ordering::Equal => {
                    if let Some(left) = node.left {
                        pred = Some(self.max_node(left));
                    }
                    if let Some(right) = node.right {
                        succ = Some(self.min_node(right));
                    }
                    break;
                }
            }
        }
        (
            pred.map(|id| &self.nodes[id].key),
            succ.map(|id| &self.nodes[id].key),
        )
    }

    /// All keys before `key` and all keys after it, nearest first.
    #[must_use]
    pub fn predecessors_successors<O>(&self, key: &K, order: &O) -> (Vec<&K>, Vec<&K>)
    where
        O: KeyOrder<K> + ?Sized,
    {
        let mut preds = Vec::new();
        let mut succs = Vec::new();
        for k in self.iter() {
            match order.compare(k, key) {
                Ordering::Less => preds.push(k),
                Ordering::Greater => succs.push(k),
                Ordering::Equal => {}
            }
        }
        preds.reverse();
        (preds, succs)
    }

    /// Splits the tree around the run of keys a locator accepts.
    ///
    /// `locate(k)` must be monotone over tree order: `Less` for keys before
    /// the run, `Equal` inside it, `Greater` after it.
    #[must_use]
    pub fn span_by<F>(&self, locate: F) -> Span<'_, K>
    where
        F: Fn(&K) -> Ordering,
    {
        let mut before = None;
        let mut stack = Vec::new();
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if locate(&node.key) == Ordering::Less {
                before = Some(&node.key);
                cur = node.right;
            } else {
                stack.push(id);
                cur = node.left;
            }
        }

        let mut matching = Vec::new();
        let mut after = None;
        for key in (Iter { tree: self, stack }) {
            if locate(key) == Ordering::Equal {
                matching.push(key);
            } else {
                after = Some(key);
                break;
            }
        }
        Span {
            before,
            matching,
            after,
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[self.min_node(id)].key)
    }

    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[self.max_node(id)].key)
    }

    /// In-order iterator over the keys.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Snapshot of the keys in order.
    #[must_use]
    pub fn in_order(&self) -> Vec<&K> {
        self.iter().collect()
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    fn insert_at<O>(&mut self, node: Option<NodeId>, key: K, order: &O) -> (NodeId, bool)
    where
        O: KeyOrder<K> + ?Sized,
    {
        let Some(id) = node else {
            let id = self.nodes.insert(Node {
                key,
                left: None,
                right: None,
                height: 1,
            });
            return (id, true);
        };
        match order.compare(&key, &self.nodes[id].key) {
            Ordering::Equal => (id, false),
            Ordering::Less => {
                let (child, inserted) = self.insert_at(self.nodes[id].left, key, order);
                self.nodes[id].left = Some(child);
                if inserted {
                    (self.rebalance(id), true)
                } else {
                    (id, false)
                }
            }
            Ordering::Greater => {
                let (child, inserted) = self.insert_at(self.nodes[id].right, key, order);
                self.nodes[id].right = Some(child);
                if inserted {
                    (self.rebalance(id), true)
                } else {
                    (id, false)
                }
            }
        }
    }

    fn remove_at<O>(
        &mut self,
        node: Option<NodeId>,
        key: &K,
        order: &O,
    ) -> (Option<NodeId>, Option<K>)
    where
        O: KeyOrder<K> + ?Sized,
    {
        let Some(id) = node else {
            return (None, None);
        };
        match order.compare(key, &self.nodes[id].key) {
            Ordering::Less => {
                let (child, removed) = self.remove_at(self.nodes[id].left, key, order);
                self.nodes[id].left = child;
                if removed.is_none() {
                    return (Some(id), None);
                }
                (Some(self.rebalance(id)), removed)
            }
            Ordering::Greater => {
                let (child, removed) = self.remove_at(self.nodes[id].right, key, order);
                self.nodes[id].right = child;
                if removed.is_none() {
                    return (Some(id), None);
                }
                (Some(self.rebalance(id)), removed)
            }
            Ordering::Equal => {
                let replacement = match (self.nodes[id].left, self.nodes[id].right) {
                    (None, child) | (child, None) => child,
                    (Some(left), Some(right)) => {
                        // The in-order successor takes the removed node's place.
                        let (rest, min) = self.detach_min(right);
                        self.nodes[min].left = Some(left);
                        self.nodes[min].right = rest;
                        Some(self.rebalance(min))
                    }
                };
                let removed = self.nodes.remove(id).map(|n| n.key);
                (replacement, removed)
            }
        }
    }

    /// Unlinks the minimum node of the subtree at `id`.
    /// Returns the rebalanced remainder and the detached node.
    fn detach_min(&mut self, id: NodeId) -> (Option<NodeId>, NodeId) {
        match self.nodes[id].left {
            None => {
                let right = self.nodes[id].right.take();
                (right, id)
            }
            Some(left) => {
                let (rest, min) = self.detach_min(left);
                self.nodes[id].left = rest;
                (Some(self.rebalance(id)), min)
            }
        }
    }

    fn height_of(&self, node: Option<NodeId>) -> u32 {
        node.map_or(0, |id| self.nodes[id].height)
    }

    fn update_height(&mut self, id: NodeId) {
        let h = 1 + self
            .height_of(self.nodes[id].left)
            .max(self.height_of(self.nodes[id].right));
        self.nodes[id].height = h;
    }

    fn balance(&self, id: NodeId) -> i64 {
        i64::from(self.height_of(self.nodes[id].left))
            - i64::from(self.height_of(self.nodes[id].right))
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].left else {
            return id;
        };
        self.nodes[id].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(id);
        self.update_height(id);
        self.update_height(pivot);
        pivot
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].right else {
            return id;
        };
        self.nodes[id].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(id);
        self.update_height(id);
        self.update_height(pivot);
        pivot
    }

    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance(id);
        if balance > 1 {
            if let Some(left) = self.nodes[id].left {
                if self.balance(left) < 0 {
                    let new_left = self.rotate_left(left);
                    self.nodes[id].left = Some(new_left);
                }
            }
            return self.rotate_right(id);
        }
        if balance < -1 {
            if let Some(right) = self.nodes[id].right {
                if self.balance(right) > 0 {
                    let new_right = self.rotate_right(right);
                    self.nodes[id].right = Some(new_right);
                }
            }
            return self.rotate_left(id);
        }
        id
    }
}

/// In-order iterator over a [`StatusTree`].
#[derive(Debug)]
pub struct Iter<'a, K> {
    tree: &'a StatusTree<K>,
    stack: Vec<NodeId>,
}

impl<K> Iter<'_, K> {
    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.tree.nodes[id].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        self.push_left_spine(node.right);
        Some(&node.key)
    }
}

impl<'a, K> IntoIterator for &'a StatusTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
