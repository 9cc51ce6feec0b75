use core::num::NonZero;

// Narrow index width under test so arena exhaustion is reachable.
#[cfg(test)]
type Repr = u16;
#[cfg(not(test))]
type Repr = u32;

/// A stable index into an arena slot.
///
/// Encoded as the slot index plus one in a `NonZero`, so `Option<Handle>`
/// has no overhead. A tree node carries three of these (parent, left,
/// right) plus its value handle, so the niche keeps every link at 4 bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Repr>);

impl Handle {
    /// Largest addressable slot index; one is lost to the niche encoding.
    pub(crate) const MAX: usize = Repr::MAX as usize - 1;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - slot index out of range!");
        #[allow(clippy::cast_possible_truncation)]
        let encoded = index as Repr + 1;
        match NonZero::new(encoded) {
            Some(repr) => Self(repr),
            // index <= MAX, so encoded is at least 1 and did not wrap.
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // The niche must hold: an optional handle costs nothing extra.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, Repr);

    #[test]
    fn boundary_indices_round_trip() {
        assert_eq!(Handle::from_index(0).to_index(), 0);
        assert_eq!(Handle::from_index(Handle::MAX).to_index(), Handle::MAX);
    }

    #[test]
    #[should_panic(expected = "slot index out of range")]
    fn index_past_max_is_rejected() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    proptest! {
        #[test]
        fn round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            prop_assert_eq!(handle.to_index(), index);
        }
    }
}
