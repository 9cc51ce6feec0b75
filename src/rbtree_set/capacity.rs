use super::RBTreeSet;
use crate::RBTreeMap;

impl<T> RBTreeSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::with_capacity(32);
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeSet {
            map: RBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the set.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::with_capacity(32);
    /// assert!(set.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the largest number of elements the set can theoretically
    /// hold, bounded by the arena's handle width.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubra_tree::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::new();
    /// assert!(set.max_len() >= set.len());
    /// ```
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.map.max_len()
    }
}
