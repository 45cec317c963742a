use std::fmt;
use std::ops::{Index, IndexMut};

use crate::allocator::{Allocator, Global};
use crate::cursor::Cursor;
use crate::error::{OutOfRange, TryReserveError};
use crate::store::Store;
use crate::DEFAULT_CAPACITY;

/// The integer flavor of the list. Behaves exactly like any other `ArrayList`.
pub type IntegerList = ArrayList<i32>;

/// A growable, contiguous list of `T` addressed by index.
///
/// The capacity starts at the requested initial size (or `DEFAULT_CAPACITY`) and doubles
/// every time an insertion would overflow it. Removals shift the tail to the left so that
/// indices stay dense and the relative order of the remaining items is preserved.
pub struct ArrayList<T, A: Allocator = Global> {
    store: Store<T, A>,
}

impl<T> ArrayList<T> {
    /// Creates an empty list with `DEFAULT_CAPACITY` slots.
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty list with `cap` slots.
    ///
    /// A capacity of zero is not a usable initial size: it is replaced with `DEFAULT_CAPACITY`
    /// and a warning is logged.
    pub fn with_capacity(cap: usize) -> Self {
        Self::with_capacity_in(cap, Global)
    }
}

impl<T, A: Allocator> ArrayList<T, A> {
    pub fn new_in(allocator: A) -> Self {
        Self::with_capacity_in(DEFAULT_CAPACITY, allocator)
    }

    pub fn with_capacity_in(cap: usize, allocator: A) -> Self {
        match Self::try_with_capacity_in(cap, allocator) {
            Ok(list) => list,
            Err(err) => err.handle(),
        }
    }

    pub fn try_with_capacity_in(cap: usize, allocator: A) -> Result<Self, TryReserveError> {
        Ok(ArrayList {
            store: Store::try_with_capacity_in(initial_capacity(cap), allocator)?,
        })
    }

    /// Appends an item after the last one, doubling the capacity if the list is full.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow and aborts if the allocator fails, like the standard
    /// collections do. See `try_add` for a fallible version.
    #[inline]
    pub fn add(&mut self, item: T) {
        if let Err(err) = self.store.try_push(item) {
            err.handle();
        }
    }

    /// Appends an item, returning an error instead of aborting if the list can't grow.
    ///
    /// The item is dropped on failure and the list is left unchanged.
    #[inline]
    pub fn try_add(&mut self, item: T) -> Result<(), TryReserveError> {
        self.store.try_push(item)
    }

    /// Returns the item at `index`, or `OutOfRange` if `index >= count()`.
    pub fn get_element(&self, index: usize) -> Result<&T, OutOfRange> {
        self.get(index).ok_or(OutOfRange { index, len: self.len() })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the index of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|x| x == item)
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns `false` and does nothing if there is no such item.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    /// Removes the item at `index`, shifting every item after it one position to the left.
    ///
    /// Returns `false` and does nothing if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> bool {
        self.take_at(index).is_some()
    }

    /// Like `remove_at` but hands the removed item back instead of dropping it.
    pub fn take_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }

        Some(self.store.remove(index))
    }

    /// Removes all items. The capacity is kept.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns the number of items in the list.
    #[inline]
    pub fn count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the total number of items the list can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.store.allocator()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.store.as_mut_slice()
    }

    /// Starts a traversal of the list, positioned before the first item.
    ///
    /// The cursor borrows the list, so the list can't be modified while it is alive.
    pub fn cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self)
    }
}

fn initial_capacity(requested: usize) -> usize {
    if requested == 0 {
        log::warn!("Invalid initial capacity 0, using the default of {DEFAULT_CAPACITY} instead.");
        return DEFAULT_CAPACITY;
    }

    requested
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for ArrayList<T, A> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity_in(self.capacity(), self.allocator().clone());
        for item in self.as_slice() {
            // Can't reallocate, the capacity is the same.
            let _ = list.store.push_within_capacity(item.clone());
        }

        list
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ArrayList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Extend<T> for ArrayList<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ArrayList::new();
        list.extend(iter);

        list
    }
}

impl<T: PartialEq, A1: Allocator, A2: Allocator> PartialEq<ArrayList<T, A2>> for ArrayList<T, A1> {
    fn eq(&self, other: &ArrayList<T, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for ArrayList<T, A> {}

impl<T: PartialEq<T>, A: Allocator> PartialEq<&[T]> for ArrayList<T, A> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, A: Allocator> AsRef<[T]> for ArrayList<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for ArrayList<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator, I> Index<I> for ArrayList<T, A>
where
    I: std::slice::SliceIndex<[T]>,
{
    type Output = <I as std::slice::SliceIndex<[T]>>::Output;
    fn index(&self, index: I) -> &Self::Output {
        self.as_slice().index(index)
    }
}

impl<T, A: Allocator, I> IndexMut<I> for ArrayList<T, A>
where
    I: std::slice::SliceIndex<[T]>,
{
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.as_mut_slice().index_mut(index)
    }
}

#[cfg(test)]
use crate::testing::{init_logger, num, CountingAllocator, DropCounter};

#[test]
fn list_example() {
    let mut list = IntegerList::new();
    assert_eq!(list.capacity(), 4);

    for i in 1..=5 {
        list.add(i);
    }
    assert_eq!(list.count(), 5);
    assert_eq!(list.get_element(4), Ok(&5));

    assert!(list.remove_at(0));
    assert_eq!(list.count(), 4);
    assert_eq!(list.get_element(0), Ok(&2));

    assert!(list.remove(&5));
    assert_eq!(list.count(), 3);
    assert!(!list.contains(&5));

    assert!(!list.remove(&100));
    assert_eq!(list.count(), 3);

    assert!(!list.remove_at(5));

    list.clear();
    assert_eq!(list.count(), 0);
}

#[test]
fn generic_list_of_strings() {
    let mut list = ArrayList::new();
    list.add("Hello".to_string());
    list.add("World".to_string());
    list.add("!".to_string());

    let mut words = Vec::new();
    for word in &list {
        words.push(word.as_str());
    }

    assert_eq!(words, ["Hello", "World", "!"]);
    assert_eq!(list.index_of(&"World".to_string()), Some(1));
}

#[test]
fn order_preserved_across_growth() {
    let mut list = ArrayList::with_capacity(3);
    for i in 0..13 {
        list.add(num(i));
    }

    assert_eq!(list.capacity(), 24);
    for i in 0..13 {
        assert_eq!(list.get_element(i as usize), Ok(&num(i)));
    }
    assert_eq!(list.get_element(13), Err(OutOfRange { index: 13, len: 13 }));
}

#[test]
fn capacity_doubles() {
    let mut list = ArrayList::new();
    let mut capacities = Vec::new();
    for i in 0..17u32 {
        list.add(i);
        capacities.push(list.capacity());
    }

    assert_eq!(&capacities[..4], &[4, 4, 4, 4]);
    assert_eq!(&capacities[4..8], &[8, 8, 8, 8]);
    assert_eq!(&capacities[8..16], &[16; 8]);
    assert_eq!(capacities[16], 32);
}

#[test]
fn zero_capacity_falls_back_to_default() {
    init_logger();

    let mut list: ArrayList<u8> = ArrayList::with_capacity(0);
    assert_eq!(list.capacity(), DEFAULT_CAPACITY);
    assert!(list.is_empty());

    list.add(1);
    assert_eq!(list.as_slice(), &[1]);
}

#[test]
fn get_element_bounds_on_length() {
    let mut list = ArrayList::with_capacity(8);
    list.add(1u32);
    list.add(2);

    assert_eq!(list.capacity(), 8);
    assert_eq!(list.get_element(1), Ok(&2));
    assert_eq!(list.get_element(2), Err(OutOfRange { index: 2, len: 2 }));
    assert_eq!(list.get_element(7), Err(OutOfRange { index: 7, len: 2 }));
    assert_eq!(list.get(8), None);
}

#[test]
fn remove_at_reindexes() {
    let mut list: ArrayList<Box<u32>> = (0..8).map(num).collect();

    assert!(list.remove_at(3));
    assert_eq!(list.count(), 7);
    assert_eq!(list.as_slice(), &[num(0), num(1), num(2), num(4), num(5), num(6), num(7)]);

    assert!(list.remove_at(6));
    assert_eq!(list.as_slice(), &[num(0), num(1), num(2), num(4), num(5), num(6)]);

    assert!(!list.remove_at(6));
    assert_eq!(list.count(), 6);
}

#[test]
fn remove_takes_first_occurrence() {
    let mut list: ArrayList<u32> = [3, 1, 3, 2, 3].into_iter().collect();

    assert_eq!(list.index_of(&3), Some(0));
    assert!(list.remove(&3));
    assert_eq!(list.as_slice(), &[1, 3, 2, 3]);
    assert_eq!(list.index_of(&3), Some(1));
    assert_eq!(list.index_of(&7), None);
}

#[test]
fn membership_round_trip() {
    let mut list = ArrayList::new();
    list.add(num(10));
    list.add(num(20));

    list.add(num(30));
    assert!(list.contains(&num(30)));

    assert!(list.remove(&num(30)));
    assert!(!list.contains(&num(30)));
    assert!(list.contains(&num(10)));
}

#[test]
fn clear_then_every_read_fails() {
    let mut list: ArrayList<Box<u32>> = (0..10).map(num).collect();
    let cap = list.capacity();

    list.clear();
    assert_eq!(list.count(), 0);
    assert_eq!(list.capacity(), cap);
    for i in 0..cap + 2 {
        assert_eq!(list.get_element(i), Err(OutOfRange { index: i, len: 0 }));
    }

    list.clear();
    assert_eq!(list.count(), 0);

    list.add(num(5));
    assert_eq!(list.get_element(0), Ok(&num(5)));
}

#[test]
fn take_at_returns_item() {
    let mut list: ArrayList<Box<u32>> = (0..3).map(num).collect();
    assert_eq!(list.take_at(1), Some(num(1)));
    assert_eq!(list.take_at(2), None);
    assert_eq!(list.as_slice(), &[num(0), num(2)]);
}

#[test]
fn drop_accounting() {
    static COUNTER: DropCounter = DropCounter::new();

    let allocator = CountingAllocator::new();
    {
        let mut list = ArrayList::new_in(&allocator);
        for i in 0..9 {
            list.add(COUNTER.item(i));
        }

        assert!(list.remove(&COUNTER.item(4)));
        // The probe and the removed item.
        assert_eq!(COUNTER.dropped(), 2);

        assert!(!list.remove_at(100));
        assert_eq!(COUNTER.dropped(), 2);

        list.clear();
        assert_eq!(COUNTER.dropped(), 10);

        list.add(COUNTER.item(1));
        list.add(COUNTER.item(2));
    }

    assert_eq!(COUNTER.dropped(), 12);
    assert_eq!(allocator.live(), 0);
}

#[test]
fn try_add_reports_allocation_failure() {
    let allocator = CountingAllocator::with_limit(1);
    let mut list = ArrayList::with_capacity_in(2, &allocator);
    assert_eq!(list.try_add(1u64), Ok(()));
    assert_eq!(list.try_add(2), Ok(()));

    let err = list.try_add(3).unwrap_err();
    assert!(matches!(err, TryReserveError::Allocator { .. }));
    assert_eq!(list.as_slice(), &[1, 2]);
}

#[test]
fn zero_sized_items() {
    let allocator = CountingAllocator::new();
    let mut list = ArrayList::new_in(&allocator);
    for _ in 0..100 {
        list.add(());
    }

    assert_eq!(list.count(), 100);
    assert_eq!(list.capacity(), 128);
    assert!(list.remove_at(50));
    assert_eq!(list.count(), 99);
    assert_eq!(allocator.allocations(), 0);
}

#[test]
fn clone_and_compare() {
    let mut a: ArrayList<Box<u32>> = ArrayList::with_capacity(5);
    a.extend((0..7).map(num));

    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(b.capacity(), a.capacity());

    a.remove_at(0);
    assert_ne!(a, b);
    assert_eq!(format!("{:?}", ArrayList::from_iter([1, 2, 3])), "[1, 2, 3]");
}

#[test]
fn index_operators() {
    let mut list: IntegerList = (1..=4).collect();
    list[0] = 10;
    assert_eq!(list[0], 10);
    assert_eq!(&list[1..3], &[2, 3]);
    *list.get_mut(3).unwrap() += 1;
    assert_eq!(list.as_slice(), &[10, 2, 3, 5]);
}
