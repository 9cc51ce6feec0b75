use super::handle::Handle;

/// Node color for the red-black balancing discipline.
///
/// Absent children (`None` links) count as `Black`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A single tree node: key, value handle, color, and links.
///
/// Nodes are pure storage; all algorithms live in `RawRBTree`. The value
/// itself lives in a separate arena so iterators can hand out `&K` and
/// `&mut V` at the same time without aliasing the node storage.
///
/// `parent` is a non-owning back-reference used for traversal and fixup
/// only; the arena owns every node.
#[derive(Clone)]
pub(crate) struct RBNode<K> {
    key: K,
    value: Handle,
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> RBNode<K> {
    /// Creates a new red leaf node, detached from the tree.
    ///
    /// New nodes are always red; insertion fixup restores the invariants.
    pub(crate) fn new(key: K, value: Handle) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn key_mut(&mut self) -> &mut K {
        &mut self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> Handle {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: Handle) {
        self.value = value;
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Consumes the node, returning its key and value handle.
    pub(crate) fn into_parts(self) -> (K, Handle) {
        (self.key, self.value)
    }
}
