use core::alloc::Layout;
use core::fmt;

/// Error type for APIs with fallible heap allocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// Overflow `isize::MAX` bytes or other error during capacity computation.
    CapacityOverflow,
    /// The allocator returned an error.
    Allocator {
        /// The layout that was passed to the allocator.
        layout: Layout,
    },
}

impl TryReserveError {
    /// Aborts the way the standard collections do when an infallible operation fails to allocate.
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub(crate) fn handle(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow => panic!("capacity overflow"),
            TryReserveError::Allocator { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => f.write_str("capacity overflow"),
            TryReserveError::Allocator { layout } => write!(
                f,
                "allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align(),
            ),
        }
    }
}

impl std::error::Error for TryReserveError {}

/// Returned when reading at an index outside of `[0, len)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "index {} is out of range for a list of length {}", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

#[test]
fn messages() {
    let err = OutOfRange { index: 7, len: 3 };
    assert_eq!(err.to_string(), "index 7 is out of range for a list of length 3");

    let layout = Layout::from_size_align(64, 8).unwrap();
    assert_eq!(
        TryReserveError::Allocator { layout }.to_string(),
        "allocation of 64 bytes (align 8) failed"
    );
    assert_eq!(TryReserveError::CapacityOverflow.to_string(), "capacity overflow");
}
