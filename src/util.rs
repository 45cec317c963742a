use core::alloc::Layout;

use crate::error::TryReserveError;
use crate::{DEFAULT_CAPACITY, GROWTH_FACTOR};

pub(crate) fn buffer_layout<T>(cap: usize) -> Result<Layout, TryReserveError> {
    Layout::array::<T>(cap).map_err(|_| TryReserveError::CapacityOverflow)
}

/// Returns the smallest `cap * GROWTH_FACTOR^k` that is at least `required`.
///
/// A zero capacity starts over from `DEFAULT_CAPACITY`.
pub(crate) fn grow_doubling(cap: usize, required: usize) -> Result<usize, TryReserveError> {
    let mut new_cap = if cap == 0 { DEFAULT_CAPACITY } else { cap };
    while new_cap < required {
        new_cap = new_cap
            .checked_mul(GROWTH_FACTOR)
            .ok_or(TryReserveError::CapacityOverflow)?;
    }

    Ok(new_cap)
}

// Waiting for `non_null_convenience` to be stabilized.
pub(crate) mod nnptr {
    use core::ptr::{self, NonNull};

    #[inline(always)]
    pub unsafe fn read<T>(src: NonNull<T>) -> T {
        ptr::read(src.as_ptr())
    }

    #[inline(always)]
    pub unsafe fn write<T>(dst: NonNull<T>, val: T) {
        ptr::write(dst.as_ptr(), val)
    }

    #[inline(always)]
    pub unsafe fn copy<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn add<T>(p: NonNull<T>, count: usize) -> NonNull<T> {
        NonNull::new_unchecked(p.as_ptr().add(count))
    }
}

#[test]
fn doubling() {
    assert_eq!(grow_doubling(4, 5), Ok(8));
    assert_eq!(grow_doubling(4, 4), Ok(4));
    assert_eq!(grow_doubling(3, 13), Ok(24));
    assert_eq!(grow_doubling(0, 1), Ok(DEFAULT_CAPACITY));
    assert_eq!(grow_doubling(usize::MAX / 2 + 1, usize::MAX), Err(TryReserveError::CapacityOverflow));
}

#[test]
fn layout_overflow() {
    assert!(buffer_layout::<u64>(16).is_ok());
    assert_eq!(buffer_layout::<u64>(usize::MAX).unwrap_err(), TryReserveError::CapacityOverflow);
    assert_eq!(buffer_layout::<()>(usize::MAX).map(|l| l.size()), Ok(0));
}
