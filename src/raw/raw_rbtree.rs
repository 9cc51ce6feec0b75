use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, RBNode};

/// The core red-black tree backing `RBTreeMap`, `RBTreeSet`, and
/// `RBTreeMultiSet`.
///
/// Keys (with the node structure) and values live in separate arenas, so
/// mutable value access never aliases the link storage that searches and
/// rotations read.
pub(crate) struct RawRBTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<RBNode<K>>,
    /// Arena storing all values (separate from nodes for disjoint borrows).
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of elements in the tree.
    len: usize,
}

/// Result of a unique-key insertion attempt.
pub(crate) enum InsertOutcome<K, V> {
    /// A new node was attached and the tree rebalanced.
    Inserted(Handle),
    /// An equal key was already present: the tree is untouched and the
    /// rejected element is handed back for the caller to dispose or swap in.
    Existing(Handle, K, V),
}

impl<K, V> RawRBTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &RBNode<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut RBNode<K> {
        self.nodes.get_mut(handle)
    }

    /// Returns the key stored at `handle`.
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.node(handle).key()
    }

    /// Returns the key-value pair stored at `handle`.
    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (node.key(), self.values.get(node.value()))
    }

    /// Returns a reference to the value stored at `handle`.
    pub(crate) fn value_ref(&self, handle: Handle) -> &V {
        self.values.get(self.node(handle).value())
    }

    /// Returns a mutable reference to the value stored at `handle`.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        let value_handle = self.node(handle).value();
        self.values.get_mut(value_handle)
    }

    /// Replaces the value stored at `handle`, returning the old value.
    ///
    /// The node itself (key, color, links) is untouched.
    pub(crate) fn replace_value(&mut self, handle: Handle, value: V) -> V {
        let value_handle = self.node(handle).value();
        mem::replace(self.values.get_mut(value_handle), value)
    }

    /// Replaces the key stored at `handle`, returning the old key.
    ///
    /// The new key must compare equal to the old one, otherwise the in-order
    /// invariant is silently broken.
    pub(crate) fn replace_key(&mut self, handle: Handle, key: K) -> K {
        mem::replace(self.node_mut(handle).key_mut(), key)
    }

    /// Returns a reference to a node by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRBTree<K, V>`.
    pub(crate) unsafe fn node_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a RBNode<K> {
        // SAFETY: We only access the `nodes` field through addr_of, avoiding
        // aliasing with the `values` field.
        unsafe { Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), handle) }
    }

    /// Returns a mutable reference to a value by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRBTree<K, V>`.
    /// - The caller must have logical exclusive access to the value at
    ///   `handle` and must not hold another reference to the values arena.
    pub(crate) unsafe fn value_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut V {
        // SAFETY: We only access the `values` field, avoiding aliasing with
        // the `nodes` field.
        unsafe { (*core::ptr::addr_of_mut!((*ptr).values)).get_mut(handle) }
    }

    /// In-order successor of `handle` computed through a raw pointer,
    /// touching only the `nodes` arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRBTree<K, V>`.
    pub(crate) unsafe fn successor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: All accesses go through `node_ptr`, which reads only the
        // `nodes` field.
        unsafe {
            let node = Self::node_ptr(ptr, handle);
            if let Some(right) = node.right() {
                let mut current = right;
                while let Some(left) = Self::node_ptr(ptr, current).left() {
                    current = left;
                }
                return Some(current);
            }
            let mut current = handle;
            let mut parent = node.parent();
            while let Some(p) = parent {
                let parent_node = Self::node_ptr(ptr, p);
                if parent_node.left() == Some(current) {
                    return Some(p);
                }
                current = p;
                parent = parent_node.parent();
            }
            None
        }
    }

    /// In-order predecessor of `handle` computed through a raw pointer,
    /// touching only the `nodes` arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRBTree<K, V>`.
    pub(crate) unsafe fn predecessor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: All accesses go through `node_ptr`, which reads only the
        // `nodes` field.
        unsafe {
            let node = Self::node_ptr(ptr, handle);
            if let Some(left) = node.left() {
                let mut current = left;
                while let Some(right) = Self::node_ptr(ptr, current).right() {
                    current = right;
                }
                return Some(current);
            }
            let mut current = handle;
            let mut parent = node.parent();
            while let Some(p) = parent {
                let parent_node = Self::node_ptr(ptr, p);
                if parent_node.right() == Some(current) {
                    return Some(p);
                }
                current = p;
                parent = parent_node.parent();
            }
            None
        }
    }

    /// Returns the leftmost (minimum) node, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_of(root))
    }

    /// Returns the rightmost (maximum) node, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max_of(root))
    }

    fn min_of(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    fn max_of(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the in-order successor of `handle`, or `None` past the end.
    ///
    /// Walks the right subtree's leftmost path, or climbs parent links until
    /// arriving from a left child.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Some(self.min_of(right));
        }
        let mut current = handle;
        let mut parent = self.node(handle).parent();
        while let Some(p) = parent {
            if self.node(p).left() == Some(current) {
                return Some(p);
            }
            current = p;
            parent = self.node(p).parent();
        }
        None
    }

    /// Returns the in-order predecessor of `handle`, or `None` before the
    /// beginning.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.node(handle).left() {
            return Some(self.max_of(left));
        }
        let mut current = handle;
        let mut parent = self.node(handle).parent();
        while let Some(p) = parent {
            if self.node(p).right() == Some(current) {
                return Some(p);
            }
            current = p;
            parent = self.node(p).parent();
        }
        None
    }

    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        // Absent children are black.
        handle.is_some_and(|h| self.node(h).color() == Color::Red)
    }

    /// Left rotation around `x`: `x`'s right child takes `x`'s place and `x`
    /// becomes its left child. A constant number of handle rewrites; no
    /// element moves.
    fn rotate_left(&mut self, x: Handle) {
        let y = self.node(x).right().expect("`rotate_left()` requires a right child");

        let y_left = self.node(y).left();
        self.node_mut(x).set_right(y_left);
        if let Some(child) = y_left {
            self.node_mut(child).set_parent(Some(x));
        }

        let x_parent = self.node(x).parent();
        self.node_mut(y).set_parent(x_parent);
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.node(p).left() == Some(x) {
                    self.node_mut(p).set_left(Some(y));
                } else {
                    self.node_mut(p).set_right(Some(y));
                }
            }
        }

        self.node_mut(y).set_left(Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    /// Right rotation around `y`; the mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, y: Handle) {
        let x = self.node(y).left().expect("`rotate_right()` requires a left child");

        let x_right = self.node(x).right();
        self.node_mut(y).set_left(x_right);
        if let Some(child) = x_right {
            self.node_mut(child).set_parent(Some(y));
        }

        let y_parent = self.node(y).parent();
        self.node_mut(x).set_parent(y_parent);
        match y_parent {
            None => self.root = Some(x),
            Some(p) => {
                if self.node(p).left() == Some(y) {
                    self.node_mut(p).set_left(Some(x));
                } else {
                    self.node_mut(p).set_right(Some(x));
                }
            }
        }

        self.node_mut(x).set_right(Some(y));
        self.node_mut(y).set_parent(Some(x));
    }

    /// Replaces `parent`'s link to `old` with `new` (or the root when
    /// `parent` is `None`), and points `new` back at `parent`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.node(p).left() == Some(old) {
                    self.node_mut(p).set_left(new);
                } else {
                    self.node_mut(p).set_right(new);
                }
            }
        }
        if let Some(n) = new {
            self.node_mut(n).set_parent(parent);
        }
    }

    /// Attaches a fresh red node under `parent` and restores the red-black
    /// invariants. Shared by both insertion policies.
    ///
    /// The value and node are allocated before any link is rewritten, so an
    /// allocation failure cannot leave the tree half-linked.
    fn attach(&mut self, parent: Option<Handle>, as_left: bool, key: K, value: V) -> Handle {
        let value_handle = self.values.alloc(value);
        let mut node = RBNode::new(key, value_handle);
        node.set_parent(parent);
        let handle = self.nodes.alloc(node);

        match parent {
            None => self.root = Some(handle),
            Some(p) => {
                if as_left {
                    self.node_mut(p).set_left(Some(handle));
                } else {
                    self.node_mut(p).set_right(Some(handle));
                }
            }
        }
        self.len += 1;

        self.insert_fixup(handle);
        handle
    }

    /// Restores the red-black invariants after attaching a red node.
    ///
    /// Standard case analysis: a red uncle is recolored and the violation
    /// moves up two levels; a black uncle is resolved with one or two
    /// rotations. Terminates when the parent is black or the node is the
    /// root; the root is forced black at the end.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent() {
            if self.node(parent).color() == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.node(parent).parent().expect("red node cannot be the root");

            if self.node(grandparent).left() == Some(parent) {
                let uncle = self.node(grandparent).right();
                if self.is_red(uncle) {
                    self.node_mut(parent).set_color(Color::Black);
                    self.node_mut(uncle.expect("red uncle exists")).set_color(Color::Black);
                    self.node_mut(grandparent).set_color(Color::Red);
                    node = grandparent;
                } else {
                    if self.node(parent).right() == Some(node) {
                        // Inner child: rotate it to the outside first.
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.node(node).parent().expect("rotation preserves the parent");
                    let grandparent = self.node(parent).parent().expect("violation implies a grandparent");
                    self.node_mut(parent).set_color(Color::Black);
                    self.node_mut(grandparent).set_color(Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.node(grandparent).left();
                if self.is_red(uncle) {
                    self.node_mut(parent).set_color(Color::Black);
                    self.node_mut(uncle.expect("red uncle exists")).set_color(Color::Black);
                    self.node_mut(grandparent).set_color(Color::Red);
                    node = grandparent;
                } else {
                    if self.node(parent).left() == Some(node) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.node(node).parent().expect("rotation preserves the parent");
                    let grandparent = self.node(parent).parent().expect("violation implies a grandparent");
                    self.node_mut(parent).set_color(Color::Black);
                    self.node_mut(grandparent).set_color(Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root.expect("fixup runs on a non-empty tree");
        self.node_mut(root).set_color(Color::Black);
    }

    /// Removes the node at `handle`, returning its key and value.
    ///
    /// A node with two children first swaps its key/value slots with its
    /// in-order successor, so the physical splice below only ever removes a
    /// node with at most one child. Consequence for cursors: erasing a
    /// two-child node leaves the successor's old handle pointing at the
    /// erased element's neighbor with swapped contents; only the returned
    /// element's handle becomes invalid.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V) {
        let target = {
            let node = self.node(handle);
            if node.left().is_some() && node.right().is_some() {
                let successor = self.min_of(node.right().expect("checked above"));
                self.swap_contents(handle, successor);
                successor
            } else {
                handle
            }
        };

        let parent = self.node(target).parent();
        let child = self.node(target).left().or(self.node(target).right());
        let removed_color = self.node(target).color();

        self.replace_child(parent, target, child);

        let (key, value_handle) = self.nodes.take(target).into_parts();
        let value = self.values.take(value_handle);
        self.len -= 1;

        // Removing a black node costs one black unit on that path.
        if removed_color == Color::Black {
            self.remove_fixup(child, parent);
        }

        (key, value)
    }

    /// Swaps the key and value slots of two nodes; colors and links stay put.
    fn swap_contents(&mut self, a: Handle, b: Handle) {
        let (node_a, node_b) = self.nodes.get2_mut(a, b);
        mem::swap(node_a.key_mut(), node_b.key_mut());
        let value_a = node_a.value();
        node_a.set_value(node_b.value());
        node_b.set_value(value_a);
    }

    /// Restores the red-black invariants after splicing out a black node.
    ///
    /// `x` is the child that took the removed node's place (possibly absent,
    /// which counts as black) and `parent` its new parent. Walks up applying
    /// the sibling cases until the missing black unit is absorbed or the
    /// root is reached.
    fn remove_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };

            if self.node(p).left() == x {
                let mut sibling = self.node(p).right().expect("black-height invariant guarantees a sibling");
                if self.is_red(Some(sibling)) {
                    // Red sibling: rotate it up to expose a black one.
                    self.node_mut(sibling).set_color(Color::Black);
                    self.node_mut(p).set_color(Color::Red);
                    self.rotate_left(p);
                    sibling = self.node(p).right().expect("rotation leaves a sibling");
                }

                let near = self.node(sibling).left();
                let far = self.node(sibling).right();
                if !self.is_red(near) && !self.is_red(far) {
                    // Both of the sibling's children black: push the
                    // deficiency one level up.
                    self.node_mut(sibling).set_color(Color::Red);
                    x = Some(p);
                    parent = self.node(p).parent();
                } else {
                    let sibling = if self.is_red(far) {
                        sibling
                    } else {
                        // Near child red, far child black: rotate the near
                        // child over the sibling.
                        self.node_mut(near.expect("near child is red")).set_color(Color::Black);
                        self.node_mut(sibling).set_color(Color::Red);
                        self.rotate_right(sibling);
                        self.node(p).right().expect("rotation leaves a sibling")
                    };
                    // Far child red: terminal case, deficiency absorbed.
                    let parent_color = self.node(p).color();
                    self.node_mut(sibling).set_color(parent_color);
                    self.node_mut(p).set_color(Color::Black);
                    let far = self.node(sibling).right().expect("far child is red in the terminal case");
                    self.node_mut(far).set_color(Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                    break;
                }
            } else {
                let mut sibling = self.node(p).left().expect("black-height invariant guarantees a sibling");
                if self.is_red(Some(sibling)) {
                    self.node_mut(sibling).set_color(Color::Black);
                    self.node_mut(p).set_color(Color::Red);
                    self.rotate_right(p);
                    sibling = self.node(p).left().expect("rotation leaves a sibling");
                }

                let near = self.node(sibling).right();
                let far = self.node(sibling).left();
                if !self.is_red(near) && !self.is_red(far) {
                    self.node_mut(sibling).set_color(Color::Red);
                    x = Some(p);
                    parent = self.node(p).parent();
                } else {
                    let sibling = if self.is_red(far) {
                        sibling
                    } else {
                        self.node_mut(near.expect("near child is red")).set_color(Color::Black);
                        self.node_mut(sibling).set_color(Color::Red);
                        self.rotate_left(sibling);
                        self.node(p).left().expect("rotation leaves a sibling")
                    };
                    let parent_color = self.node(p).color();
                    self.node_mut(sibling).set_color(parent_color);
                    self.node_mut(p).set_color(Color::Black);
                    let far = self.node(sibling).left().expect("far child is red in the terminal case");
                    self.node_mut(far).set_color(Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                    break;
                }
            }
        }

        if let Some(h) = x {
            self.node_mut(h).set_color(Color::Black);
        }
    }

    /// Drains all elements in key order.
    ///
    /// O(n): the handle sequence is collected by a successor walk, then each
    /// node is taken without rebalancing (unlike repeated `pop_first`).
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        if self.len == 0 {
            return Vec::new();
        }

        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            current = self.successor(handle);
            handles.push(handle);
        }

        let mut result = Vec::with_capacity(handles.len());
        for handle in handles {
            let (key, value_handle) = self.nodes.take(handle).into_parts();
            result.push((key, self.values.take(value_handle)));
        }

        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;

        result
    }
}

impl<K: Ord, V> RawRBTree<K, V> {
    /// Returns the leftmost node comparing equal to `key`, if any.
    ///
    /// Resolving through `lower_bound` gives unique and multi-key trees one
    /// shared search path, and "first equal in in-order sequence" for the
    /// multiset.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.lower_bound(key)?;
        (self.node(handle).key().borrow() == key).then_some(handle)
    }

    /// Returns the first node whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            if self.node(handle).key().borrow() < key {
                current = self.node(handle).right();
            } else {
                best = Some(handle);
                current = self.node(handle).left();
            }
        }
        best
    }

    /// Returns the first node whose key is greater than `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            if self.node(handle).key().borrow() <= key {
                current = self.node(handle).right();
            } else {
                best = Some(handle);
                current = self.node(handle).left();
            }
        }
        best
    }

    /// Returns the last node whose key is not greater than `key`.
    pub(crate) fn upper_bound_inclusive<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            if self.node(handle).key().borrow() <= key {
                best = Some(handle);
                current = self.node(handle).right();
            } else {
                current = self.node(handle).left();
            }
        }
        best
    }

    /// Returns the last node whose key is less than `key`.
    pub(crate) fn lower_bound_exclusive<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            if self.node(handle).key().borrow() < key {
                best = Some(handle);
                current = self.node(handle).right();
            } else {
                current = self.node(handle).left();
            }
        }
        best
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.value_ref(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.value_mut(handle))
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.key_value(handle))
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts under the unique-key policy.
    ///
    /// On an equal key, returns [`InsertOutcome::Existing`] without touching
    /// the tree; the caller decides whether to swap the key or value in via
    /// [`Self::replace_key`]/[`Self::replace_value`].
    pub(crate) fn insert_unique(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        let mut current = self.root;
        let mut parent = None;
        let mut as_left = false;

        while let Some(handle) = current {
            parent = Some(handle);
            match key.cmp(self.node(handle).key()) {
                Ordering::Less => {
                    as_left = true;
                    current = self.node(handle).left();
                }
                Ordering::Greater => {
                    as_left = false;
                    current = self.node(handle).right();
                }
                Ordering::Equal => return InsertOutcome::Existing(handle, key, value),
            }
        }

        InsertOutcome::Inserted(self.attach(parent, as_left, key, value))
    }

    /// Inserts under the multi-key policy.
    ///
    /// Equal keys descend right, so repeated equal-key insertions form a
    /// stable chain and in-order traversal yields them contiguously in
    /// insertion order. Attach and fixup are the same path as
    /// [`Self::insert_unique`].
    pub(crate) fn insert_multi(&mut self, key: K, value: V) -> Handle {
        let mut current = self.root;
        let mut parent = None;
        let mut as_left = false;

        while let Some(handle) = current {
            parent = Some(handle);
            if key < *self.node(handle).key() {
                as_left = true;
                current = self.node(handle).left();
            } else {
                as_left = false;
                current = self.node(handle).right();
            }
        }

        self.attach(parent, as_left, key, value)
    }

    /// Removes a key from the tree and returns the key-value pair.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.remove_at(handle))
    }

    /// Removes and returns the first (minimum) element.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.first()?;
        Some(self.remove_at(handle))
    }

    /// Removes and returns the last (maximum) element.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.last()?;
        Some(self.remove_at(handle))
    }
}

impl<K: Clone, V: Clone> Clone for RawRBTree<K, V> {
    fn clone(&self) -> Self {
        fn clone_node<K: Clone, V: Clone>(
            old: &RawRBTree<K, V>,
            new_nodes: &mut Arena<RBNode<K>>,
            new_values: &mut Arena<V>,
            old_handle: Handle,
            new_parent: Option<Handle>,
        ) -> Handle {
            let old_node = old.nodes.get(old_handle);

            let value_handle = new_values.alloc(old.values.get(old_node.value()).clone());
            let mut node = RBNode::new(old_node.key().clone(), value_handle);
            node.set_color(old_node.color());
            node.set_parent(new_parent);
            let handle = new_nodes.alloc(node);

            if let Some(left) = old_node.left() {
                let new_left = clone_node(old, new_nodes, new_values, left, Some(handle));
                new_nodes.get_mut(handle).set_left(Some(new_left));
            }
            if let Some(right) = old_node.right() {
                let new_right = clone_node(old, new_nodes, new_values, right, Some(handle));
                new_nodes.get_mut(handle).set_right(Some(new_right));
            }

            handle
        }

        let mut new_nodes = Arena::with_capacity(self.len);
        let mut new_values = Arena::with_capacity(self.len);

        let new_root = self.root.map(|root| clone_node(self, &mut new_nodes, &mut new_values, root, None));

        Self {
            nodes: new_nodes,
            values: new_values,
            root: new_root,
            len: self.len,
        }
    }
}
