use crate::allocator::{Allocator, Global};
use crate::buffer::RawBuffer;
use crate::error::TryReserveError;
use crate::util;

/// A raw buffer plus the number of initialized items at its front.
///
/// Slots `[0, len)` are initialized, slots `[len, capacity)` are not.
pub struct Store<T, A: Allocator = Global> {
    buffer: RawBuffer<T, A>,
    len: usize,
}

impl<T, A: Allocator> Store<T, A> {
    /// Creates an empty store with room for exactly `cap` items.
    pub fn try_with_capacity_in(cap: usize, allocator: A) -> Result<Self, TryReserveError> {
        Ok(Store {
            buffer: RawBuffer::try_allocate_in(cap, allocator)?,
            len: 0,
        })
    }

    /// Makes sure the store can hold at least `required` items, doubling the capacity as many
    /// times as needed.
    ///
    /// This is the only path that changes the capacity. It never shrinks.
    #[inline]
    pub fn ensure_capacity_for(&mut self, required: usize) -> Result<(), TryReserveError> {
        if required <= self.capacity() {
            return Ok(());
        }

        self.grow_for(required)
    }

    #[cold]
    fn grow_for(&mut self, required: usize) -> Result<(), TryReserveError> {
        let new_cap = util::grow_doubling(self.capacity(), required)?;
        self.buffer.try_reallocate(new_cap)
    }

    #[inline]
    /// Returns `true` if the store contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    /// Returns the number of initialized items.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns the total number of items the store can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns number of items that can be added without reallocating.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buffer.as_slice(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buffer.as_mut_slice(self.len) }
    }

    /// Appends an item, growing the buffer if it is full.
    ///
    /// If growing fails the item is dropped and the store is left unchanged.
    #[inline]
    pub fn try_push(&mut self, val: T) -> Result<(), TryReserveError> {
        let required = self.len.checked_add(1).ok_or(TryReserveError::CapacityOverflow)?;
        self.ensure_capacity_for(required)?;

        unsafe {
            self.buffer.write_item(self.len, val);
        }
        self.len += 1;

        Ok(())
    }

    /// Appends an item if there is sufficient spare capacity, otherwise an error is returned
    /// with the item.
    #[inline]
    pub fn push_within_capacity(&mut self, val: T) -> Result<(), T> {
        if self.len == self.capacity() {
            return Err(val);
        }

        unsafe {
            self.buffer.write_item(self.len, val);
        }
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the item at position `index`, shifting all items after it to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("remove: index {index} should be < len {len}.");
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        unsafe {
            // Copy it out, unsafely having a copy of the value on
            // the stack and in the buffer at the same time.
            let ret = self.buffer.read_item(index);

            // Shift everything down to fill in that spot.
            self.buffer.shift_left(index, self.len - index - 1);
            self.len -= 1;

            ret
        }
    }

    /// Drops all items. The capacity is retained.
    pub fn clear(&mut self) {
        let items: *mut [T] = self.as_mut_slice();
        unsafe {
            // Set the length first so that a panicking drop can't cause a double drop.
            self.len = 0;
            core::ptr::drop_in_place(items);
        }
    }
}

impl<T, A: Allocator> Drop for Store<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
use crate::testing::{num, CountingAllocator, DropCounter};

#[test]
fn push_and_grow() {
    let mut store: Store<Box<u32>> = Store::try_with_capacity_in(2, Global).unwrap();
    for i in 0..5 {
        store.try_push(num(i)).unwrap();
    }

    assert_eq!(store.len(), 5);
    assert_eq!(store.capacity(), 8);
    assert_eq!(store.remaining_capacity(), 3);
    assert_eq!(store.as_slice(), &[num(0), num(1), num(2), num(3), num(4)]);
}

#[test]
fn ensure_capacity_is_noop_when_large_enough() {
    let allocator = CountingAllocator::new();
    let mut store: Store<u32, _> = Store::try_with_capacity_in(4, &allocator).unwrap();
    store.ensure_capacity_for(4).unwrap();
    assert_eq!(allocator.allocations(), 1);
    assert_eq!(store.capacity(), 4);

    store.ensure_capacity_for(9).unwrap();
    assert_eq!(store.capacity(), 16);
    assert_eq!(allocator.allocations(), 2);
}

#[test]
fn within_capacity() {
    let mut store: Store<u8> = Store::try_with_capacity_in(1, Global).unwrap();
    assert_eq!(store.push_within_capacity(1), Ok(()));
    assert_eq!(store.push_within_capacity(2), Err(2));
    assert_eq!(store.as_slice(), &[1]);
}

#[test]
fn remove_shifts_left() {
    let mut store: Store<Box<u32>> = Store::try_with_capacity_in(4, Global).unwrap();
    for i in 0..4 {
        store.try_push(num(i)).unwrap();
    }

    assert_eq!(store.remove(1), num(1));
    assert_eq!(store.as_slice(), &[num(0), num(2), num(3)]);
    assert_eq!(store.remove(2), num(3));
    assert_eq!(store.as_slice(), &[num(0), num(2)]);
    assert_eq!(store.remove(0), num(0));
    assert_eq!(store.as_slice(), &[num(2)]);
}

#[test]
#[should_panic]
fn remove_out_of_bounds() {
    let mut store: Store<u32> = Store::try_with_capacity_in(4, Global).unwrap();
    store.try_push(1).unwrap();
    store.remove(1);
}

#[test]
fn drops_each_item_once() {
    static COUNTER: DropCounter = DropCounter::new();

    let allocator = CountingAllocator::new();
    {
        let mut store = Store::try_with_capacity_in(4, &allocator).unwrap();
        for i in 0..10 {
            store.try_push(COUNTER.item(i)).unwrap();
        }

        drop(store.remove(3));
        assert_eq!(COUNTER.dropped(), 1);

        store.clear();
        assert_eq!(COUNTER.dropped(), 10);
        assert_eq!(store.capacity(), 16);

        store.try_push(COUNTER.item(42)).unwrap();
    }

    assert_eq!(COUNTER.dropped(), 11);
    assert_eq!(allocator.live(), 0);
}

#[test]
fn failed_growth_leaves_store_intact() {
    let allocator = CountingAllocator::with_limit(1);
    let mut store: Store<u32, _> = Store::try_with_capacity_in(2, &allocator).unwrap();
    store.try_push(1).unwrap();
    store.try_push(2).unwrap();

    assert!(store.try_push(3).is_err());
    assert_eq!(store.as_slice(), &[1, 2]);
    assert_eq!(store.capacity(), 2);
}
