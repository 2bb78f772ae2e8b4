//! Arena-backed doubly linked list with stable node handles.
//!
//! Nodes live in a slot vector and refer to their neighbours by [`NodeId`]
//! rather than by pointer. A `NodeId` carries the generation of the slot it
//! was issued for, so a handle to a removed node never resolves to whatever
//! node later reuses the slot.
//!
//! # Example
//!
//! ```
//! use vim_jumplist::history::linked_list::LinkedList;
//!
//! let mut list = LinkedList::new();
//! let b = list.push_back("b");
//! list.push_front("a");
//! list.insert_after(b, "c");
//!
//! let values: Vec<_> = list.iter_head().map(|(_, v)| *v).collect();
//! assert_eq!(values, vec!["a", "b", "c"]);
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_LIST_TAG: AtomicU32 = AtomicU32::new(0);

/// Handle to a node in a [`LinkedList`].
///
/// Handles stay valid until the node is removed or the list is cleared.
/// After that every list operation treats them as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    list: u32,
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node<T> {
    data: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Ordered container with O(1) insertion and removal at known nodes.
#[derive(Debug)]
pub struct LinkedList<T> {
    /// Distinguishes handles issued by this list from handles of other lists
    tag: u32,
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots, reused before the arena grows
    free: Vec<u32>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            tag: NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first node, if any.
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Returns the last node, if any.
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns true if `id` refers to a live node of this list.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the data stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.data)
    }

    /// Returns the data stored at `id` for in-place mutation.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.data)
    }

    /// Returns the node following `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.next
    }

    /// Returns the node preceding `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.prev
    }

    /// Inserts `data` as the new head.
    pub fn push_front(&mut self, data: T) -> NodeId {
        let old_head = self.head;
        let id = self.alloc(Node {
            data,
            prev: None,
            next: old_head,
        });

        match old_head.and_then(|head| self.node_mut(head)) {
            Some(head) => head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Inserts `data` as the new tail.
    pub fn push_back(&mut self, data: T) -> NodeId {
        let old_tail = self.tail;
        let id = self.alloc(Node {
            data,
            prev: old_tail,
            next: None,
        });

        match old_tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Inserts `data` directly before `at`.
    ///
    /// Inserting before the head is the same as [`push_front`](Self::push_front).
    /// Returns `None` without touching the list if `at` is not a live node.
    pub fn insert_before(&mut self, at: NodeId, data: T) -> Option<NodeId> {
        let Some(prev) = self.node(at)?.prev else {
            return Some(self.push_front(data));
        };

        let id = self.alloc(Node {
            data,
            prev: Some(prev),
            next: Some(at),
        });
        if let Some(node) = self.node_mut(prev) {
            node.next = Some(id);
        }
        if let Some(node) = self.node_mut(at) {
            node.prev = Some(id);
        }
        self.len += 1;
        Some(id)
    }

    /// Inserts `data` directly after `at`.
    ///
    /// Inserting after the tail is the same as [`push_back`](Self::push_back).
    /// Returns `None` without touching the list if `at` is not a live node.
    pub fn insert_after(&mut self, at: NodeId, data: T) -> Option<NodeId> {
        let Some(next) = self.node(at)?.next else {
            return Some(self.push_back(data));
        };

        let id = self.alloc(Node {
            data,
            prev: Some(at),
            next: Some(next),
        });
        if let Some(node) = self.node_mut(next) {
            node.prev = Some(id);
        }
        if let Some(node) = self.node_mut(at) {
            node.next = Some(id);
        }
        self.len += 1;
        Some(id)
    }

    /// Unlinks `id` and returns its data.
    ///
    /// Stale or foreign handles are rejected with `None`.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }

        let slot = &mut self.slots[id.index as usize];
        let removed = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        match removed.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = removed.next,
            None => self.head = removed.next,
        }
        match removed.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = removed.prev,
            None => self.tail = removed.prev,
        }
        self.len -= 1;
        Some(removed.data)
    }

    /// Removes every node whose data matches `pred`, head to tail.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<(NodeId, T)>
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<NodeId> = self
            .iter_head()
            .filter(|&(_, data)| pred(data))
            .map(|(id, _)| id)
            .collect();

        doomed
            .into_iter()
            .filter_map(|id| self.remove(id).map(|data| (id, data)))
            .collect()
    }

    /// Drops every node. All previously issued handles become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walks from `start` towards the tail, `start` included.
    pub fn iter_next(&self, start: NodeId) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: Some(start),
            direction: Direction::Next,
        }
    }

    /// Walks from `start` towards the head, `start` included.
    pub fn iter_prev(&self, start: NodeId) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: Some(start),
            direction: Direction::Prev,
        }
    }

    /// Walks the whole list from head to tail.
    pub fn iter_head(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            direction: Direction::Next,
        }
    }

    /// Walks the whole list from tail to head.
    pub fn iter_tail(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.tail,
            direction: Direction::Prev,
        }
    }

    /// Mutable access to every live value, in arena order rather than list order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.node.as_mut().map(|node| &mut node.data))
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        if id.list != self.tag {
            return None;
        }
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.list != self.tag {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                list: self.tag,
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            list: self.tag,
            index,
            generation: 0,
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Prev,
}

/// Lazy traversal in one direction.
///
/// Borrows the list, so the list cannot be restructured while a traversal
/// is alive.
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<NodeId>,
    direction: Direction,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id)?;
        self.cursor = match self.direction {
            Direction::Next => node.next,
            Direction::Prev => node.prev,
        };
        Some((id, &node.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks head/tail/len and that every link is mirrored by its neighbour.
    fn assert_linked<T>(list: &LinkedList<T>) {
        let forward: Vec<NodeId> = list.iter_head().map(|(id, _)| id).collect();
        let mut backward: Vec<NodeId> = list.iter_tail().map(|(id, _)| id).collect();
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
        assert_eq!(list.head(), forward.first().copied());
        assert_eq!(list.tail(), forward.last().copied());

        if let Some(head) = list.head() {
            assert_eq!(list.prev(head), None);
        }
        if let Some(tail) = list.tail() {
            assert_eq!(list.next(tail), None);
        }
        for pair in forward.windows(2) {
            assert_eq!(list.next(pair[0]), Some(pair[1]));
            assert_eq!(list.prev(pair[1]), Some(pair[0]));
        }
    }

    fn values<T: Copy>(list: &LinkedList<T>) -> Vec<T> {
        list.iter_head().map(|(_, v)| *v).collect()
    }

    #[test]
    fn test_empty_list() {
        let list: LinkedList<u32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert_eq!(list.iter_head().count(), 0);
        assert_linked(&list);
    }

    #[test]
    fn test_single_node_is_head_and_tail() {
        let mut list = LinkedList::new();
        let id = list.push_back(1);
        assert_eq!(list.head(), Some(id));
        assert_eq!(list.tail(), Some(id));
        assert_linked(&list);
    }

    #[test]
    fn test_push_front_and_back() {
        let mut list = LinkedList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn test_insert_before_head_degrades_to_push_front() {
        let mut list = LinkedList::new();
        let head = list.push_back(2);
        let new_head = list.insert_before(head, 1).unwrap();
        assert_eq!(list.head(), Some(new_head));
        assert_eq!(values(&list), vec![1, 2]);
        assert_linked(&list);
    }

    #[test]
    fn test_insert_after_tail_degrades_to_push_back() {
        let mut list = LinkedList::new();
        let tail = list.push_back(1);
        let new_tail = list.insert_after(tail, 2).unwrap();
        assert_eq!(list.tail(), Some(new_tail));
        assert_eq!(values(&list), vec![1, 2]);
        assert_linked(&list);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let c = list.push_back(4);
        list.insert_after(a, 2);
        list.insert_before(c, 3);
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_linked(&list);
    }

    #[test]
    fn test_remove_boundaries_and_middle() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), Some(2));
        assert_linked(&list);
        assert_eq!(list.remove(a), Some(1));
        assert_linked(&list);
        assert_eq!(list.remove(c), Some(3));
        assert_linked(&list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_stale_id_is_rejected_after_slot_reuse() {
        let mut list = LinkedList::new();
        let old = list.push_back(1);
        list.remove(old);
        let reused = list.push_back(2);

        assert_ne!(old, reused);
        assert_eq!(list.get(old), None);
        assert_eq!(list.remove(old), None);
        assert_eq!(list.insert_after(old, 3), None);
        assert_eq!(values(&list), vec![2]);
    }

    #[test]
    fn test_foreign_id_is_rejected() {
        let mut a = LinkedList::new();
        let mut b = LinkedList::new();
        let foreign = a.push_back(1);
        b.push_back(2);

        assert_eq!(b.get(foreign), None);
        assert_eq!(b.remove(foreign), None);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_clear_resets_and_invalidates() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert!(!list.contains(a));
        assert_linked(&list);
    }

    #[test]
    fn test_iterators_from_middle() {
        let mut list = LinkedList::new();
        list.push_back(1);
        let b = list.push_back(2);
        list.push_back(3);

        let forward: Vec<_> = list.iter_next(b).map(|(_, v)| *v).collect();
        let backward: Vec<_> = list.iter_prev(b).map(|(_, v)| *v).collect();
        assert_eq!(forward, vec![2, 3]);
        assert_eq!(backward, vec![2, 1]);

        let from_tail: Vec<_> = list.iter_tail().map(|(_, v)| *v).collect();
        assert_eq!(from_tail, vec![3, 2, 1]);
    }

    #[test]
    fn test_remove_where() {
        let mut list = LinkedList::new();
        for v in 1..=6 {
            list.push_back(v);
        }
        let removed = list.remove_where(|v| v % 2 == 0);
        assert_eq!(removed.len(), 3);
        assert_eq!(values(&list), vec![1, 3, 5]);
        assert_linked(&list);
    }
}
