//! Arena-backed doubly linked list used as the recency list.
//!
//! Nodes live in a `Vec` and are addressed by [`Handle`]s. Links between nodes
//! are optional handles rather than pointers, so the list needs no `unsafe`
//! and owns every node outright. Vacated slots are recycled through a free
//! list, which keeps handles of live nodes stable for their whole lifetime.

extern crate alloc;

use alloc::fmt;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

/// Stable address of a node inside a [`List`].
///
/// A handle stays valid until its node is removed. After removal the slot may
/// be reused, so callers must drop handles of removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A node in the doubly linked list.
struct Node<T> {
    val: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Doubly linked list ordered from front (most recent) to back (least recent).
pub struct List<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        List {
            nodes: Vec::with_capacity(cap.get()),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the current number of nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the front (most recently used) node.
    #[cfg(test)]
    #[inline]
    pub fn first(&self) -> Option<Handle> {
        self.head
    }

    /// Handle of the back (least recently used) node.
    #[inline]
    pub fn last(&self) -> Option<Handle> {
        self.tail
    }

    /// Adds `val` at the front of the list and returns its handle.
    pub fn add(&mut self, val: T) -> Handle {
        let node = Node {
            val,
            prev: None,
            next: None,
        };
        let handle = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                Handle(idx)
            }
            None => {
                self.nodes.push(Some(node));
                Handle(self.nodes.len() - 1)
            }
        };
        self.attach(handle);
        self.len += 1;
        handle
    }

    /// Moves `handle` to the front of the list.
    ///
    /// Does nothing if the node is already at the front or the handle is stale.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.node(handle).is_none() {
            return;
        }
        self.detach(handle);
        self.attach(handle);
    }

    /// Removes the back node and returns its value.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Removes an arbitrary node and returns its value.
    ///
    /// Returns `None` if the handle does not refer to a live node.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.node(handle)?;
        self.detach(handle);
        let node = self.nodes[handle.0].take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(node.val)
    }

    /// Returns a reference to the value stored at `handle`.
    #[inline]
    pub fn get_value(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.val)
    }

    /// Removes every node and releases the arena slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from front (most recent) to back (least recent).
    ///
    /// The iterator is double ended, so `.rev()` walks back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    #[inline]
    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        self.nodes.get(handle.0).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<T>> {
        self.nodes.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Unlinks a node from its neighbours, leaving it allocated.
    fn detach(&mut self, handle: Handle) {
        let (prev, next) = match self.node_mut(handle) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(next_node) = self.node_mut(next) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Links a detached node in at the front.
    fn attach(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.node_mut(old_head) {
                    head_node.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.nodes.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

/// Borrowing iterator over a [`List`], front to back.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.val)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn front_to_back<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    /// Walks the links by hand and checks them against `len`, `head` and `tail`.
    fn assert_links<T>(list: &List<T>) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = list.head;
        while let Some(handle) = cursor {
            let node = list.node(handle).unwrap();
            assert_eq!(node.prev, prev);
            prev = Some(handle);
            cursor = node.next;
            count += 1;
            assert!(count <= list.len(), "cycle in list");
        }
        assert_eq!(count, list.len());
        assert_eq!(list.tail, prev);
        assert_eq!(list.head.is_none(), list.tail.is_none());
    }

    #[test]
    fn test_construct_empty() {
        let list: List<u32> = List::new(cap(5));
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_links(&list);
    }

    #[test]
    fn test_add_items() {
        let mut list = List::new(cap(3));
        let a = list.add(1);
        let b = list.add(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.first(), Some(b));
        assert_eq!(list.last(), Some(a));
        assert_eq!(front_to_back(&list), vec![2, 1]);
        assert_links(&list);
    }

    #[test]
    fn test_get_value() {
        let mut list = List::new(cap(2));
        let a = list.add(10);
        assert_eq!(list.get_value(a), Some(&10));
        list.remove(a);
        assert_eq!(list.get_value(a), None);
    }

    #[test]
    fn test_remove_last() {
        let mut list = List::new(cap(3));
        list.add(1);
        list.add(2);
        list.add(3);
        assert_eq!(list.remove_last(), Some(1));
        assert_eq!(list.remove_last(), Some(2));
        assert_links(&list);
        assert_eq!(list.remove_last(), Some(3));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
        assert_links(&list);
    }

    #[test]
    fn test_remove_middle_head_and_tail() {
        let mut list = List::new(cap(4));
        let a = list.add('a');
        let b = list.add('b');
        let c = list.add('c');
        let d = list.add('d');

        assert_eq!(list.remove(b), Some('b'));
        assert_eq!(front_to_back(&list), vec!['d', 'c', 'a']);
        assert_links(&list);

        assert_eq!(list.remove(d), Some('d'));
        assert_eq!(list.first(), Some(c));
        assert_links(&list);

        assert_eq!(list.remove(a), Some('a'));
        assert_eq!(list.last(), Some(c));
        assert_links(&list);

        assert_eq!(list.remove(a), None);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new(cap(3));
        let a = list.add(1);
        let b = list.add(2);
        let c = list.add(3);

        list.move_to_front(a);
        assert_eq!(front_to_back(&list), vec![1, 3, 2]);
        assert_eq!(list.last(), Some(b));
        assert_links(&list);

        list.move_to_front(c);
        assert_eq!(front_to_back(&list), vec![3, 1, 2]);
        assert_links(&list);

        // already at the front
        list.move_to_front(c);
        assert_eq!(front_to_back(&list), vec![3, 1, 2]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_touched_node_outlives_newer_one() {
        let mut list = List::new(cap(3));
        let a = list.add("a");
        let _b = list.add("b");

        list.move_to_front(a);
        assert_eq!(list.remove_last(), Some("b"));
        assert_eq!(list.remove_last(), Some("a"));
        assert_eq!(list.remove_last(), None);
    }

    #[test]
    fn test_move_single_node() {
        let mut list = List::new(cap(1));
        let a = list.add(7);
        list.move_to_front(a);
        assert_eq!(list.first(), Some(a));
        assert_eq!(list.last(), Some(a));
        assert_links(&list);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = List::new(cap(2));
        let a = list.add(1);
        list.add(2);
        list.remove(a);
        let c = list.add(3);
        assert_eq!(c, a);
        assert_eq!(list.nodes.len(), 2);
        assert_eq!(front_to_back(&list), vec![3, 2]);
        assert_links(&list);
    }

    #[test]
    fn test_clear() {
        let mut list = List::new(cap(3));
        list.add(String::from("x"));
        list.add(String::from("y"));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert_links(&list);

        list.add(String::from("z"));
        assert_eq!(front_to_back(&list), vec![String::from("z")]);
    }

    #[test]
    fn test_iter_both_directions() {
        let mut list = List::new(cap(4));
        for i in 1..=4 {
            list.add(i);
        }
        let back_to_front: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(back_to_front, vec![1, 2, 3, 4]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.next_back(), Some(&1));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_length_consistency_after_mixed_operations() {
        let mut list = List::new(cap(8));
        let mut handles = Vec::new();
        for i in 0..8 {
            handles.push(list.add(i));
        }
        list.move_to_front(handles[0]);
        list.move_to_front(handles[4]);
        list.remove(handles[2]);
        list.remove_last();
        list.move_to_front(handles[7]);
        list.remove(handles[0]);
        assert_eq!(list.len(), 5);
        assert_eq!(front_to_back(&list), vec![7, 4, 6, 5, 3]);
        assert_links(&list);
    }
}
