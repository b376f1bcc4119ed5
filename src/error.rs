use derive_more::{Display, Error};

/// An index fell outside the valid logical range of a [`Collection`].
///
/// For reads, writes, removals, and exchanges the valid range is `0..len`; for
/// [`insert_at`] it is `0..=len`. A collection that rejects an index is left
/// exactly as it was.
///
/// [`Collection`]: crate::Collection
/// [`insert_at`]: crate::Collection::insert_at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
#[display("index {index} is out of range for collection of length {len}")]
pub struct IndexOutOfRange {
    /// The rejected index.
    pub index: usize,
    /// Length of the collection when the index was rejected.
    pub len: usize,
}

impl IndexOutOfRange {
    #[inline(always)]
    pub(crate) const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }
}
