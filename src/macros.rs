/// Create a [`Collection`] holding the given elements, in order.
///
/// Capacity is [`MIN_CAPACITY`] unless more elements than that are listed.
///
/// ```
/// use collection::{Collection, collection};
///
/// let empty: Collection<u8> = collection![];
/// assert_eq!(empty.to_string(), "[]");
///
/// let c = collection![5, 6,];
/// assert_eq!(c.to_string(), "[5, 6]");
/// assert_eq!(c.capacity(), 16);
/// ```
///
/// [`Collection`]: crate::Collection
/// [`MIN_CAPACITY`]: crate::Collection::MIN_CAPACITY
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Collection::from([$($item),+])
    };
}
