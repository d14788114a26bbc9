//! The [`Dir`] element wrapper.
//!
//! A `Dir` is a [`Path`](crate::path::Path) that is expected to name a directory. It doesn't
//! hold a descriptor, every method goes back to the filesystem through the path.

mod dir;

pub use dir::*;
