//! Filesystem operations on [`Path`](crate::path::Path)s, built directly on libc.
//!
//! Every native call goes through a single translator that reads `errno` right after the call and
//! turns a failure into a [`CallFailure`] naming the call and its arguments. Preconditions checked
//! before any call is made fail with a [`PathError`] instead.
#![cfg(target_os = "linux")]

pub mod dir;
pub mod file;
pub mod shorthand;

mod copy;
mod element;
mod error;
mod fd;
mod file_type;
mod metadata;
mod ops;
mod query;
mod syscall;
mod temp;
mod tests;

pub use dir::Dir;
pub use element::AsPath;
pub use error::*;
pub use file::File;
pub use file_type::*;
pub use metadata::*;
pub use ops::{DIR_MODE, FILE_MODE};
pub use query::ScanOrder;
pub use temp::TempFile;
