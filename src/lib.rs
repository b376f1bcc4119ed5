#![no_std]

//! A growable, bounds-checked contiguous collection.
//!
//! [`Collection`] owns a single heap buffer of `capacity` slots, the first `len` of which hold
//! elements. It never holds fewer than [`MIN_CAPACITY`] slots, grows by doubling (or straight to
//! the required size for a bulk append), and gives memory back when a large collection is drained.
//!
//! Every index-based operation is checked against the logical length and reports
//! [`IndexOutOfRange`] instead of clamping or wrapping. A rejected call leaves the collection
//! untouched.
//!
//! Zero-Sized Types are supported; capacity is still tracked, but no allocation is ever made.
//!
//! ## Examples
//! ### Basic Usage
//!
//! ```
//! use collection::{Collection, collection};
//!
//! let mut c = collection![3, 4, 5, 6];
//! assert_eq!(c.len(), 4);
//! assert_eq!(c.capacity(), Collection::<i32>::MIN_CAPACITY);
//!
//! c.insert_at(2, 3).unwrap();
//! assert_eq!(c.to_string(), "[3, 4, 3, 5, 6]");
//!
//! c.exchange(0, 4).unwrap();
//! assert_eq!(c.remove_at(0), Ok(6));
//! assert_eq!(c.to_string(), "[4, 3, 5, 3]");
//! ```
//!
//! ### Out of Range
//!
//! ```
//! use collection::{IndexOutOfRange, collection};
//!
//! let names = collection!["Bob", "Joe"];
//! assert_eq!(names.get(2), Err(IndexOutOfRange { index: 2, len: 2 }));
//! assert_eq!(names.to_string(), "[Bob, Joe]");
//! ```
//!
//! ### Nested Rendering
//!
//! ```
//! use collection::{Collection, collection};
//! use core::fmt::Display;
//!
//! let empty: Collection<f64> = Collection::new();
//! let nested: Collection<Box<dyn Display>> = collection![
//!     Box::new(collection!["Teddy", "Gerry"]) as Box<dyn Display>,
//!     Box::new(collection![10, 20]),
//!     Box::new(empty),
//! ];
//! assert_eq!(nested.to_string(), "[[Teddy, Gerry], [10, 20], []]");
//! ```
//!
//! [`MIN_CAPACITY`]: Collection::MIN_CAPACITY

extern crate alloc;

mod error;
mod iter;
mod macros;

pub use error::IndexOutOfRange;
pub use iter::IntoIter;

use alloc::alloc::{alloc, dealloc, handle_alloc_error, realloc};
use alloc::boxed::Box;
use core::alloc::Layout;
use core::borrow::{Borrow, BorrowMut};
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop, size_of};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;

/// A growable contiguous collection with a minimum capacity of [`MIN_CAPACITY`] slots.
///
/// Elements live in `[0, len)` of a buffer of `capacity` slots, and `len <= capacity` always.
///
/// [`MIN_CAPACITY`]: Collection::MIN_CAPACITY
pub struct Collection<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Collection<T> {
    /// Capacity of a new collection, and the floor capacity never shrinks below.
    pub const MIN_CAPACITY: usize = 16;

    /// The largest capacity whose buffer fits in `isize::MAX` bytes.
    pub const MAX_CAPACITY: usize = if size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size_of::<T>()
    };

    /// Create an empty collection with [`MIN_CAPACITY`] slots.
    ///
    /// [`MIN_CAPACITY`]: Collection::MIN_CAPACITY
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(Self::MIN_CAPACITY)
    }

    /// Create an empty collection with room for at least `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    ///
    /// [`MAX_CAPACITY`]: Collection::MAX_CAPACITY
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(Self::MIN_CAPACITY);
        Self {
            ptr: Self::allocate(cap),
            cap,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Return the number of elements in the collection.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Return the number of slots in the backing buffer.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Return `true` if the collection contains no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> Collection<T> {
    /// Layout of a buffer of `cap` slots.
    ///
    /// # Panics
    /// Panics when the buffer would be larger than `isize::MAX` bytes.
    #[inline]
    pub(crate) fn buffer_layout(cap: usize) -> Layout {
        match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    /// Allocate an uninitialized buffer of `cap` slots.
    fn allocate(cap: usize) -> NonNull<T> {
        let layout = Self::buffer_layout(cap);
        // ZSTs do not have an allocation.
        if layout.size() == 0 {
            return NonNull::dangling();
        }

        // SAFETY: `cap >= MIN_CAPACITY` and `T` is not zero-sized, so the layout is non-zero.
        match NonNull::new(unsafe { alloc(layout) }) {
            Some(nn) => nn.cast(),
            None => handle_alloc_error(layout),
        }
    }

    /// Free a buffer of `cap` slots without dropping anything in it.
    ///
    /// # Safety
    /// `ptr` must have come from [`Self::allocate`] or [`Self::set_capacity`] with the same `cap`,
    /// and the caller is responsible for the drop obligations of any live elements.
    pub(crate) unsafe fn deallocate(ptr: NonNull<T>, cap: usize) {
        let layout = Self::buffer_layout(cap);
        if layout.size() != 0 {
            unsafe { dealloc(ptr.as_ptr().cast(), layout) };
        }
    }

    /// Move the buffer into an allocation of exactly `new_cap` slots.
    ///
    /// Assumes `new_cap >= self.len` and `new_cap >= MIN_CAPACITY`.
    fn set_capacity(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len && new_cap >= Self::MIN_CAPACITY);
        if new_cap == self.cap {
            return;
        }

        log::trace!("resizing collection buffer from {} to {} slots", self.cap, new_cap);

        let new_layout = Self::buffer_layout(new_cap);
        // ZSTs do not have an allocation.
        if new_layout.size() == 0 {
            self.cap = new_cap;
            return;
        }

        // SAFETY: The old layout was computable when the buffer was allocated, the new one is
        //         non-zero, and the first `len` slots fit in both.
        unsafe {
            let old_layout = Self::buffer_layout(self.cap);
            let nn = NonNull::new(realloc(
                self.ptr.as_ptr().cast(),
                old_layout,
                new_layout.size(),
            ));
            match nn {
                Some(nn) => self.ptr = nn.cast(),
                None => handle_alloc_error(new_layout),
            }
        }
        self.cap = new_cap;
    }

    /// Ensure there is room for at least `additional` more elements.
    ///
    /// When the buffer is too small it is grown once, to whichever is larger of double the current
    /// capacity or exactly what is required.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds [`MAX_CAPACITY`].
    ///
    /// [`MAX_CAPACITY`]: Collection::MAX_CAPACITY
    pub fn reserve(&mut self, additional: usize) {
        let Some(required) = self.len.checked_add(additional) else {
            capacity_overflow();
        };
        if required <= self.cap {
            return;
        }

        let doubled = self.cap.saturating_mul(2).min(Self::MAX_CAPACITY);
        self.set_capacity(doubled.max(required));
    }

    /// Reduce the capacity to the larger of the length and [`MIN_CAPACITY`].
    ///
    /// [`MIN_CAPACITY`]: Collection::MIN_CAPACITY
    pub fn shrink_to_fit(&mut self) {
        self.set_capacity(self.len.max(Self::MIN_CAPACITY));
    }

    /// Halve the buffer once the collection has drained below a quarter of its capacity.
    #[inline]
    fn shrink_after_removal(&mut self) {
        if self.cap > Self::MIN_CAPACITY && self.len < self.cap / 4 {
            self.set_capacity((self.cap / 2).max(Self::MIN_CAPACITY));
        }
    }
}

impl<T> Drop for Collection<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is initialized, and the buffer was allocated with `cap` slots.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            Self::deallocate(self.ptr, self.cap);
        }
    }
}

// SAFETY: Collection owns [T], so is Send/Sync as long as T is.
unsafe impl<T: Send> Send for Collection<T> {}
unsafe impl<T: Sync> Sync for Collection<T> {}

impl<T> Collection<T> {
    /// Extract a slice over the elements.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Extract a mutable slice over the elements.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Pointer to the start of the buffer, dangling for ZSTs.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    #[inline(always)]
    fn check_index(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfRange::new(index, self.len))
        }
    }

    /// Return a reference to the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.check_index(index)?;
        // SAFETY: Bounds checked above.
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    /// Return a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        self.check_index(index)?;
        // SAFETY: Bounds checked above.
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
    }

    /// Replace the element at `index` with `value`, returning the previous element.
    ///
    /// If `index` is out of range, `value` is dropped and the collection is unchanged.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexOutOfRange> {
        self.get_mut(index).map(|slot| mem::replace(slot, value))
    }
}

impl<T> Collection<T> {
    /// Append one element to the end of the collection.
    #[inline]
    pub fn add(&mut self, item: T) {
        if self.len == self.cap {
            self.reserve(1);
        }
        // SAFETY: `len < cap` after reserving, so the slot is in the buffer and unused.
        unsafe { self.ptr.as_ptr().add(self.len).write(item) };
        self.len += 1;
    }

    /// Append every element of `items`, in order.
    ///
    /// Capacity is reserved once for the whole batch up front.
    pub fn add_range<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.reserve(items.len());
        // `add` still checks capacity in case the iterator reports a short length.
        for item in items {
            self.add(item);
        }
    }

    /// Insert `item` at `index`, shifting every element after it one slot to the right.
    ///
    /// `index` may equal the length, which appends. If `index` is out of range, `item` is dropped
    /// and the collection is unchanged.
    pub fn insert_at(&mut self, index: usize, item: T) -> Result<(), IndexOutOfRange> {
        if index > self.len {
            return Err(IndexOutOfRange::new(index, self.len));
        }

        if self.len == self.cap {
            self.reserve(1);
        }
        // SAFETY: `index <= len < cap`, so both the shifted tail and the new slot fit.
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            p.write(item);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting every element after it one slot left.
    ///
    /// Once the collection drains below a quarter of its capacity, the buffer is halved (never
    /// below [`MIN_CAPACITY`]).
    ///
    /// [`MIN_CAPACITY`]: Collection::MIN_CAPACITY
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        self.check_index(index)?;

        // SAFETY: `index < len`; the element is read out before its slot is overwritten.
        let item = unsafe {
            let p = self.ptr.as_ptr().add(index);
            let item = p.read();
            ptr::copy(p.add(1), p, self.len - index - 1);
            item
        };
        self.len -= 1;
        self.shrink_after_removal();
        Ok(item)
    }

    /// Swap the elements at `a` and `b`.
    ///
    /// The error names the first of the two indices that is out of range.
    pub fn exchange(&mut self, a: usize, b: usize) -> Result<(), IndexOutOfRange> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.as_mut_slice().swap(a, b);
        Ok(())
    }

    /// Drop every element and return the buffer to [`MIN_CAPACITY`] slots.
    ///
    /// [`MIN_CAPACITY`]: Collection::MIN_CAPACITY
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero the length first so a panicking destructor can't cause a double drop.
        self.len = 0;
        // SAFETY: `[0, len)` was initialized and is no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
        }
        self.set_capacity(Self::MIN_CAPACITY);
    }

    /// Take apart into the raw buffer, capacity and length without dropping anything.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize) {
        let c = ManuallyDrop::new(self);
        (c.ptr, c.cap, c.len)
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Collection<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Collection<T> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Collection<T> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for Collection<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for Collection<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Panicking access. Use [`Collection::get`] to handle [`IndexOutOfRange`] instead.
impl<T> Index<usize> for Collection<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for Collection<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Collection<T> {}

impl<T: Hash> Hash for Collection<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.deref().hash(state)
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Collection<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Collection<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut c = Self::with_capacity(iter.size_hint().0);
        c.extend(iter);
        c
    }
}

impl<T, const M: usize> From<[T; M]> for Collection<T> {
    #[inline]
    fn from(array: [T; M]) -> Self {
        Self::from_iter(array)
    }
}

impl<T: Clone> From<&[T]> for Collection<T> {
    #[inline(always)]
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<T> From<Box<[T]>> for Collection<T> {
    #[inline(always)]
    fn from(boxed: Box<[T]>) -> Self {
        Self::from_iter(boxed)
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Collection<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Debug> Debug for Collection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.deref(), f)
    }
}

/// Renders as `[e0, e1, ...]`, each element through its own [`Display`].
///
/// Nested collections render recursively: `[[1, 2], []]`.
impl<T: Display> Display for Collection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(item, f)?;
        }
        f.write_str("]")
    }
}

impl<T: Clone> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self::from(self.deref())
    }
}
