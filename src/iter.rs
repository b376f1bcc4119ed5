use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::slice;

use crate::Collection;

/// A double-ended iterator over [`Collection<T>`] that consumes and drops the collection.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    cap: usize,
    start: usize,
    end: usize,
    _marker: PhantomData<T>,
}

// SAFETY: IntoIter owns the remaining [T], so is Send/Sync as long as T is.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is initialized and owned by the iterator.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        // SAFETY: `start < end <= len`, and the read transfers ownership out of the buffer.
        let item = unsafe { self.buf.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }
        self.end -= 1;

        // SAFETY: Similar to next, but from end.
        Some(unsafe { self.buf.as_ptr().add(self.end).read() })
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: Only `[start, end)` is still live, and the buffer has `cap` slots.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr().add(self.start),
                self.end - self.start,
            ));
            Collection::<T>::deallocate(self.buf, self.cap);
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, cap, len) = self.into_raw_parts();
        IntoIter {
            buf,
            cap,
            start: 0,
            end: len,
            _marker: PhantomData,
        }
    }
}
