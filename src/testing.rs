use std::cell::Cell;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::allocator::{AllocError, Allocator, Global, Layout};

/// Forwards to the global allocator, counting allocations and optionally failing past a limit.
pub struct CountingAllocator {
    allocations: Cell<usize>,
    live: Cell<usize>,
    limit: usize,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    pub fn with_limit(limit: usize) -> Self {
        CountingAllocator {
            allocations: Cell::new(0),
            live: Cell::new(0),
            limit,
        }
    }

    /// Number of successful calls to `allocate`.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Number of allocations that haven't been deallocated yet.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

unsafe impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if self.allocations.get() >= self.limit {
            return Err(AllocError);
        }

        let alloc = Global.allocate(layout)?;
        self.allocations.set(self.allocations.get() + 1);
        self.live.set(self.live.get() + 1);

        Ok(alloc)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        Global.deallocate(ptr, layout);
    }
}

/// Counts how many times values built from it were dropped.
pub struct DropCounter {
    count: AtomicUsize,
}

impl DropCounter {
    pub const fn new() -> Self {
        DropCounter { count: AtomicUsize::new(0) }
    }

    pub fn item(&self, val: u32) -> Droppable {
        Droppable { val, counter: self }
    }

    pub fn dropped(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct Droppable<'a> {
    pub val: u32,
    counter: &'a DropCounter,
}

impl<'a> PartialEq for Droppable<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<'a> Drop for Droppable<'a> {
    fn drop(&mut self) {
        self.counter.count.fetch_add(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for DropCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "DropCounter({})", self.dropped())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// In order to give us a chance to catch leaks and double-frees, test with values that implement drop.
pub fn num(val: u32) -> Box<u32> {
    Box::new(val)
}
