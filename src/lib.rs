//! A growable array list.
//!
//! `ArrayList` stores its items in a single contiguous allocation that doubles in size
//! whenever it is full. Items are addressed by index, removals shift the tail to keep the
//! indices dense, and a `Cursor` walks the items front to back.
//!
//! ```
//! use array_list::ArrayList;
//!
//! let mut list = ArrayList::new();
//! list.add("Hello");
//! list.add("World");
//!
//! assert_eq!(list.index_of(&"World"), Some(1));
//! assert!(list.remove_at(0));
//! assert_eq!(list.get_element(0), Ok(&"World"));
//!
//! for word in &list {
//!     println!("{word}");
//! }
//! ```

mod util;
pub mod allocator;
pub mod buffer;
pub mod store;
pub mod list;
pub mod cursor;
pub mod error;

#[cfg(test)]
mod testing;

pub use cursor::Cursor;
pub use error::{OutOfRange, TryReserveError};
pub use list::{ArrayList, IntegerList};

/// Capacity of a list created without an explicit (or with an invalid) initial size.
pub const DEFAULT_CAPACITY: usize = 4;

/// Factor applied to the capacity each time a list runs out of space.
pub const GROWTH_FACTOR: usize = 2;
