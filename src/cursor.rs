use std::iter::FusedIterator;

use crate::allocator::{Allocator, Global};
use crate::list::ArrayList;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    BeforeStart,
    At(usize),
    PastEnd,
}

/// A restartable, front-to-back walk over the items of an `ArrayList`.
///
/// A new cursor is positioned before the first item: call `advance` to move onto it.
/// Once `advance` returns `false` the cursor stays past the end until `reset` is called.
///
/// The cursor holds a shared borrow of the list for its whole lifetime, so the list
/// can't be structurally modified in the middle of a traversal.
pub struct Cursor<'l, T, A: Allocator = Global> {
    list: &'l ArrayList<T, A>,
    position: Position,
    current: Option<&'l T>,
}

impl<'l, T, A: Allocator> Cursor<'l, T, A> {
    pub(crate) fn new(list: &'l ArrayList<T, A>) -> Self {
        Cursor {
            list,
            position: Position::BeforeStart,
            current: None,
        }
    }

    /// Moves to the next item.
    ///
    /// Returns `false` when there are no more items.
    pub fn advance(&mut self) -> bool {
        let next = match self.position {
            Position::BeforeStart => 0,
            Position::At(index) => index + 1,
            Position::PastEnd => return false,
        };

        match self.list.get(next) {
            Some(item) => {
                self.position = Position::At(next);
                self.current = Some(item);
                true
            }
            None => {
                self.position = Position::PastEnd;
                self.current = None;
                false
            }
        }
    }

    /// The item the cursor is on, or `None` before the first `advance` and after the last one.
    #[inline]
    pub fn current(&self) -> Option<&'l T> {
        self.current
    }

    /// Index of the current item.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self.position {
            Position::At(index) => Some(index),
            _ => None,
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position == Position::PastEnd
    }

    /// Goes back to before the first item.
    pub fn reset(&mut self) {
        self.position = Position::BeforeStart;
        self.current = None;
    }

    /// Ends the traversal and gives the borrow of the list back.
    pub fn dispose(self) {}

    fn remaining(&self) -> usize {
        match self.position {
            Position::BeforeStart => self.list.len(),
            Position::At(index) => self.list.len() - index - 1,
            Position::PastEnd => 0,
        }
    }
}

impl<'l, T, A: Allocator> Clone for Cursor<'l, T, A> {
    fn clone(&self) -> Self {
        Cursor {
            list: self.list,
            position: self.position,
            current: self.current,
        }
    }
}

impl<'l, T, A: Allocator> Iterator for Cursor<'l, T, A> {
    type Item = &'l T;

    fn next(&mut self) -> Option<&'l T> {
        if self.advance() {
            return self.current;
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<'l, T, A: Allocator> ExactSizeIterator for Cursor<'l, T, A> {}

impl<'l, T, A: Allocator> FusedIterator for Cursor<'l, T, A> {}

impl<'l, T, A: Allocator> IntoIterator for &'l ArrayList<T, A> {
    type Item = &'l T;
    type IntoIter = Cursor<'l, T, A>;
    fn into_iter(self) -> Cursor<'l, T, A> {
        self.cursor()
    }
}

#[cfg(test)]
use crate::testing::num;

#[test]
fn traversal_completeness() {
    let list: ArrayList<Box<u32>> = (0..9).map(num).collect();
    let mut cursor = list.cursor();
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.position(), None);

    let mut advances = 0;
    while cursor.advance() {
        assert_eq!(cursor.position(), Some(advances));
        assert_eq!(cursor.current(), list.get_element(advances).ok());
        advances += 1;
    }

    assert_eq!(advances, list.count());
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.current(), None);
    assert!(!cursor.advance());
    assert_eq!(cursor.current(), None);
}

#[test]
fn reset_restarts() {
    let list: ArrayList<u32> = [7, 8, 9].into_iter().collect();
    let mut cursor = list.cursor();

    assert!(cursor.advance());
    assert!(cursor.advance());
    assert_eq!(cursor.current(), Some(&8));

    cursor.reset();
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.position(), None);
    assert!(cursor.advance());
    assert_eq!(cursor.current(), Some(&7));

    while cursor.advance() {}
    cursor.reset();
    assert_eq!(cursor.collect::<Vec<_>>(), [&7, &8, &9]);
}

#[test]
fn empty_list() {
    let list: ArrayList<u32> = ArrayList::new();
    let mut cursor = list.cursor();
    assert_eq!(cursor.len(), 0);
    assert!(!cursor.advance());
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.next(), None);
}

#[test]
fn iterator_protocol() {
    let list: ArrayList<Box<u32>> = (0..5).map(num).collect();
    let mut cursor = list.cursor();
    assert_eq!(cursor.len(), 5);

    assert_eq!(cursor.next(), Some(&num(0)));
    assert_eq!(cursor.len(), 4);

    let rest: Vec<u32> = cursor.clone().map(|item| **item).collect();
    assert_eq!(rest, [1, 2, 3, 4]);
    assert_eq!(cursor.position(), Some(0));

    let sum: u32 = (&list).into_iter().map(|item| **item).sum();
    assert_eq!(sum, 10);
}

#[test]
fn dispose_releases_the_list() {
    let mut list: ArrayList<u32> = (0..3).collect();
    let mut cursor = list.cursor();
    assert!(cursor.advance());
    cursor.dispose();

    list.add(3);
    assert_eq!(list.cursor().count(), 4);
}
