use crate::allocator::{Allocator, Global};
use crate::error::TryReserveError;
use crate::util::{self, nnptr};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A fixed-capacity block of uninitialized slots.
///
/// The buffer only tracks its capacity. Which slots hold live values is up to the owner,
/// and the owner is responsible for dropping them before the buffer goes away.
pub struct RawBuffer<T, A: Allocator = Global> {
    data: NonNull<T>,
    cap: usize,
    allocator: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for RawBuffer<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuffer<T, A> {}

impl<T, A: Allocator> RawBuffer<T, A> {
    /// Allocates a buffer with room for exactly `cap` items.
    ///
    /// Zero-sized layouts don't touch the allocator.
    pub fn try_allocate_in(cap: usize, allocator: A) -> Result<Self, TryReserveError> {
        let layout = util::buffer_layout::<T>(cap)?;
        let data = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            allocator
                .allocate(layout)
                .map_err(|_| TryReserveError::Allocator { layout })?
                .cast::<T>()
        };

        Ok(RawBuffer {
            data,
            cap,
            allocator,
            _marker: PhantomData,
        })
    }

    /// Moves the buffer into a block of `new_cap` slots.
    ///
    /// The contents of the first `capacity()` slots are carried over in order. On failure
    /// the buffer is left untouched.
    #[cold]
    pub fn try_reallocate(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap >= self.cap);
        profiling::scope!("RawBuffer::try_reallocate");

        let old_layout = util::buffer_layout::<T>(self.cap)?;
        let new_layout = util::buffer_layout::<T>(new_cap)?;

        if new_layout.size() != 0 {
            let new_alloc = if old_layout.size() == 0 {
                self.allocator.allocate(new_layout)
            } else {
                unsafe { self.allocator.grow(self.data.cast(), old_layout, new_layout) }
            };

            self.data = new_alloc
                .map_err(|_| TryReserveError::Allocator { layout: new_layout })?
                .cast::<T>();
        }

        log::trace!("reallocated buffer from {} to {} items", self.cap, new_cap);
        self.cap = new_cap;

        Ok(())
    }

    #[inline]
    /// Returns the total number of items the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    pub fn items_ptr(&self) -> NonNull<T> {
        self.data
    }

    /// # Safety
    ///
    /// The first `len` slots must be initialized.
    #[inline]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        core::slice::from_raw_parts(self.data.as_ptr(), len)
    }

    /// # Safety
    ///
    /// The first `len` slots must be initialized.
    #[inline]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        core::slice::from_raw_parts_mut(self.data.as_ptr(), len)
    }

    /// # Safety
    ///
    /// `index` must be in bounds. A value already in the slot is overwritten without being dropped.
    #[inline]
    pub unsafe fn write_item(&mut self, index: usize, val: T) {
        debug_assert!(index < self.cap);
        nnptr::write(nnptr::add(self.data, index), val);
    }

    /// Moves the value out of a slot, leaving it logically uninitialized.
    ///
    /// # Safety
    ///
    /// The slot at `index` must be initialized.
    #[inline]
    pub unsafe fn read_item(&mut self, index: usize) -> T {
        debug_assert!(index < self.cap);
        nnptr::read(nnptr::add(self.data, index))
    }

    /// Moves the `count` items that follow `index` one slot to the left, overwriting the slot at `index`.
    ///
    /// # Safety
    ///
    /// `index + count` must be smaller than the capacity.
    #[inline]
    pub unsafe fn shift_left(&mut self, index: usize, count: usize) {
        debug_assert!(index + count < self.cap);
        let dst = nnptr::add(self.data, index);
        nnptr::copy(nnptr::add(dst, 1), dst, count);
    }
}

impl<T, A: Allocator> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        // Can't fail, the same layout was computed when allocating.
        if let Ok(layout) = util::buffer_layout::<T>(self.cap) {
            if layout.size() != 0 {
                unsafe {
                    self.allocator.deallocate(self.data.cast(), layout);
                }
            }
        }
    }
}

#[test]
fn reallocate_preserves_items() {
    let mut buffer: RawBuffer<u32> = RawBuffer::try_allocate_in(4, Global).unwrap();
    unsafe {
        for i in 0..4 {
            buffer.write_item(i, i as u32 * 10);
        }
        buffer.try_reallocate(8).unwrap();
        assert_eq!(buffer.capacity(), 8);
        buffer.write_item(4, 40);
        assert_eq!(buffer.as_slice(5), &[0, 10, 20, 30, 40]);
    }
}

#[test]
fn shift() {
    let mut buffer: RawBuffer<u8> = RawBuffer::try_allocate_in(5, Global).unwrap();
    unsafe {
        for i in 0..5 {
            buffer.write_item(i, i as u8);
        }
        buffer.shift_left(1, 3);
        assert_eq!(buffer.as_slice(4), &[0, 2, 3, 4]);
    }
}

#[test]
fn zst_buffer_does_not_allocate() {
    let allocator = crate::testing::CountingAllocator::new();
    let mut buffer: RawBuffer<(), _> = RawBuffer::try_allocate_in(4, &allocator).unwrap();
    buffer.try_reallocate(1usize << 40).unwrap();
    assert_eq!(buffer.capacity(), 1usize << 40);
    assert_eq!(allocator.allocations(), 0);
}

#[test]
fn allocation_failure() {
    let allocator = crate::testing::CountingAllocator::with_limit(1);
    let mut buffer: RawBuffer<u64, _> = RawBuffer::try_allocate_in(2, &allocator).unwrap();
    let err = buffer.try_reallocate(4).unwrap_err();
    assert!(matches!(err, TryReserveError::Allocator { layout } if layout.size() == 32));
    assert_eq!(buffer.capacity(), 2);
}
