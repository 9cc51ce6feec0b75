use super::RBTreeMultiSet;
use crate::raw::{Handle, RawRBTree};

impl<T> RBTreeMultiSet<T> {
    /// Creates an empty multiset with capacity for at least `capacity`
    /// elements.
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeMultiSet;
    ///
    /// let bag: RBTreeMultiSet<i32> = RBTreeMultiSet::with_capacity(32);
    /// assert!(bag.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMultiSet {
            raw: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the multiset.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeMultiSet;
    ///
    /// let bag: RBTreeMultiSet<i32> = RBTreeMultiSet::with_capacity(32);
    /// assert!(bag.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of elements the multiset can theoretically
    /// hold, bounded by the arena's handle width.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeMultiSet;
    ///
    /// let bag: RBTreeMultiSet<i32> = RBTreeMultiSet::new();
    /// assert!(bag.max_len() >= bag.len());
    /// ```
    #[must_use]
    pub const fn max_len(&self) -> usize {
        Handle::MAX
    }
}
